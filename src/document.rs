//! Deep-link page generation.
//!
//! The page is a fixed HTML template with the redirect script inlined.
//! Configuration values are substituted verbatim: nothing is escaped, so
//! callers passing untrusted values should use [`generate_checked`].

use tracing::debug;

use crate::options::DeepLinkOptions;
use crate::redirect::REDIRECT_TIMEOUT;
use crate::validation::EmbedValidator;

/// HTML template with placeholders:
/// - {{PAGE_TITLE}} - `<title>` contents
/// - {{HEADING_TEXT}} - `<h1>` contents
/// - {{IOS_APP}}, {{ANDROID_APP}}, {{IOS_STORE}}, {{ANDROID_STORE}},
///   {{FALLBACK}} - navigation targets, inside single-quoted JS strings
/// - {{TIMEOUT_MS}} - redirect timeout in milliseconds
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{PAGE_TITLE}}</title>
    <meta name="robots" content="noindex,nofollow">
</head>
<body>
    <h1>{{HEADING_TEXT}}</h1>
    <script>
        function isIOS(userAgent) {
            return /iPad|iPhone|iPod/.test(userAgent) && !userAgent.includes('Windows');
        }

        function redirectToApp(appUrl, storeUrl, fallbackUrl) {
            const timeout = {{TIMEOUT_MS}};
            let hasFocus = true;
            let didHide = false;
            let resolved = false;

            function resolve(url) {
                if (resolved) {
                    return;
                }
                resolved = true;
                window.location = url;
            }

            window.location = appUrl;

            window.addEventListener('blur', () => { hasFocus = false; });
            document.addEventListener('visibilitychange', () => {
                if (document.visibilityState === 'hidden') {
                    didHide = true;
                }
            });
            window.addEventListener('focus', () => {
                if (didHide) {
                    resolve(fallbackUrl);
                }
            });

            setTimeout(() => {
                resolve(hasFocus ? storeUrl : fallbackUrl);
            }, timeout);
        }

        document.addEventListener('DOMContentLoaded', () => {
            const userAgent = navigator.userAgent;
            const isIosDevice = isIOS(userAgent);
            const appUrl = isIosDevice ? '{{IOS_APP}}' : '{{ANDROID_APP}}';
            const storeUrl = isIosDevice ? '{{IOS_STORE}}' : '{{ANDROID_STORE}}';
            const fallbackUrl = '{{FALLBACK}}';

            redirectToApp(appUrl, storeUrl, fallbackUrl);
        });
    </script>
</body>
</html>
"#;

/// Generate the deep-link page for `options`.
///
/// Pure: identical options always produce identical output. Values are
/// embedded exactly as given, including empty strings.
pub fn generate(options: &DeepLinkOptions) -> String {
    let timeout_ms = REDIRECT_TIMEOUT.as_millis().to_string();
    let urls = &options.urls;

    let page = render(PAGE_TEMPLATE, |name| match name {
        "PAGE_TITLE" => Some(options.page_title.as_str()),
        "HEADING_TEXT" => Some(options.heading_text.as_str()),
        "IOS_APP" => Some(urls.ios_app.as_str()),
        "ANDROID_APP" => Some(urls.android_app.as_str()),
        "IOS_STORE" => Some(urls.ios_store.as_str()),
        "ANDROID_STORE" => Some(urls.android_store.as_str()),
        "FALLBACK" => Some(urls.fallback.as_str()),
        "TIMEOUT_MS" => Some(timeout_ms.as_str()),
        _ => None,
    });

    debug!(bytes = page.len(), "generated deep-link page");
    page
}

/// Validate `options` with the default [`EmbedValidator`], then generate.
pub fn generate_checked(options: &DeepLinkOptions) -> crate::Result<String> {
    EmbedValidator::default().validate(options)?;
    Ok(generate(options))
}

/// Substitute `{{NAME}}` placeholders in a single pass.
///
/// Substituted values are copied through without being scanned again.
/// Unknown placeholders are left in place.
fn render<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };

        let name = &after_open[..end];
        out.push_str(&rest[..start]);
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}
