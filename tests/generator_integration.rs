//! Page generator integration tests.

use deeplink_page::{
    generate, generate_checked, AppUrls, BrowserEvent, DeepLinkError, DeepLinkOptions,
    NavigationLog, RedirectSession, Resolution, ValidationError, VisibilityState,
};

fn options() -> DeepLinkOptions {
    DeepLinkOptions::new(AppUrls::new(
        "acme-ios://product/42",
        "acme-android://product/42",
        "https://apps.apple.com/us/app/acme/id123456789",
        "https://play.google.com/store/apps/details?id=com.acme.shop",
        "https://shop.acme.test/product/42",
    ))
}

#[test]
fn test_each_url_appears_exactly_once() {
    let opts = options()
        .with_page_title("Acme")
        .with_heading_text("Opening Acme...");
    let page = generate(&opts);

    for url in [
        &opts.urls.ios_app,
        &opts.urls.android_app,
        &opts.urls.ios_store,
        &opts.urls.android_store,
        &opts.urls.fallback,
    ] {
        assert_eq!(page.matches(url.as_str()).count(), 1, "{url}");
    }
}

#[test]
fn test_title_and_heading_default_empty() {
    let page = generate(&options());
    assert!(page.contains("<title></title>"));
    assert!(page.contains("<h1></h1>"));
}

#[test]
fn test_output_contract() {
    let page = generate(&options());
    assert!(page.contains("<head>"));
    assert!(page.contains(r#"<meta name="robots" content="noindex,nofollow">"#));
    assert!(page.contains("<body>"));
    assert!(page.contains("DOMContentLoaded"));
    assert!(page.contains("visibilitychange"));
    assert!(page.contains("/iPad|iPhone|iPod/"));
    assert!(page.contains("!userAgent.includes('Windows')"));
}

#[test]
fn test_generation_is_idempotent() {
    let opts = options().with_page_title("Same");
    assert_eq!(generate(&opts), generate(&opts));
    assert_eq!(generate(&opts).as_bytes(), generate(&opts.clone()).as_bytes());
}

#[test]
fn test_missing_urls_embed_empty_targets() {
    let opts: DeepLinkOptions =
        serde_json::from_str(r#"{ "urls": { "fallback": "https://example.com" } }"#).unwrap();
    let page = generate(&opts);

    assert!(page.contains("isIosDevice ? '' : ''"));
    assert!(page.contains("const fallbackUrl = 'https://example.com';"));
}

#[test]
fn test_checked_generation_rejects_empty_url() {
    let mut opts = options();
    opts.urls.ios_app.clear();

    match generate_checked(&opts) {
        Err(DeepLinkError::Validation(ValidationError::EmptyUrl(field))) => {
            assert_eq!(field.name(), "iosApp");
        }
        other => panic!("expected empty url error, got {:?}", other),
    }
}

#[test]
fn test_checked_generation_rejects_script_breakout() {
    let mut opts = options();
    opts.urls.fallback = "https://x.test/</script><script>alert(1)//".to_string();
    assert!(generate_checked(&opts).is_err());

    // Unchecked generation embeds it verbatim.
    assert!(generate(&opts).contains("</script><script>alert(1)//"));
}

// ============================================================================
// Embedded script rules
// ============================================================================

/// The inline script of a generated page.
fn script(page: &str) -> &str {
    let start = page.find("<script>").expect("script open tag") + "<script>".len();
    let end = page.find("</script>").expect("script close tag");
    &page[start..end]
}

/// Body of the listener registered for `event`, up to its closing `});`.
fn listener<'a>(script: &'a str, event: &str) -> &'a str {
    let start = script
        .find(&format!("addEventListener('{event}'"))
        .unwrap_or_else(|| panic!("no {event} listener"));
    let len = script[start..].find("});").expect("listener end");
    &script[start..start + len]
}

/// The `(focused, unfocused)` arms of the timer's `hasFocus` ternary.
fn timer_arms(script: &str) -> (&str, &str) {
    let start = script.find("setTimeout(").expect("timer");
    let body = &script[start..];
    let ternary = body
        .split("resolve(hasFocus ? ")
        .nth(1)
        .expect("timer resolves on hasFocus");
    let ternary = &ternary[..ternary.find(')').expect("ternary end")];
    let (focused, unfocused) = ternary.split_once(" : ").expect("ternary arms");
    (focused.trim(), unfocused.trim())
}

#[test]
fn test_script_timer_prefers_store_while_focused() {
    let page = generate(&options());
    assert_eq!(timer_arms(script(&page)), ("storeUrl", "fallbackUrl"));
    assert!(script(&page).contains("}, timeout);"));
}

#[test]
fn test_script_focus_only_resolves_after_hide() {
    let page = generate(&options());
    let focus = listener(script(&page), "focus");

    assert!(focus.contains("if (didHide) {"), "{focus}");
    assert!(focus.contains("resolve(fallbackUrl);"), "{focus}");
    assert!(focus.find("if (didHide)") < focus.find("resolve("));
}

#[test]
fn test_script_blur_and_hidden_set_flags() {
    let page = generate(&options());
    let script = script(&page);

    let blur = listener(script, "blur");
    assert!(blur.starts_with("addEventListener('blur'"));
    assert!(blur.contains("hasFocus = false;"), "{blur}");
    assert!(!blur.contains("didHide"));

    let visibility = listener(script, "visibilitychange");
    assert!(visibility.contains("document.visibilityState === 'hidden'"));
    assert!(visibility.contains("didHide = true;"), "{visibility}");
    assert!(!visibility.contains("hasFocus"));

    // Only blur writes hasFocus after the declaration; focus never restores it.
    assert_eq!(script.matches("hasFocus = true").count(), 1);
    assert_eq!(script.matches("hasFocus = false").count(), 1);
    assert_eq!(script.matches("didHide = true").count(), 1);
}

#[test]
fn test_script_navigates_to_app_before_arming_observers() {
    let page = generate(&options());
    let script = script(&page);

    let app_navigation = script
        .find("window.location = appUrl;")
        .expect("app navigation");
    for hook in [
        "addEventListener('blur'",
        "addEventListener('visibilitychange'",
        "addEventListener('focus'",
        "setTimeout(",
    ] {
        let armed = script
            .find(hook)
            .unwrap_or_else(|| panic!("missing {hook}"));
        assert!(app_navigation < armed, "{hook} armed before app navigation");
    }
}

#[test]
fn test_script_resolves_only_once() {
    let page = generate(&options());
    let script = script(&page);

    let resolve = &script[script.find("function resolve(url)").expect("resolve")..];
    let guard = resolve.find("if (resolved)").expect("resolved guard");
    let navigate = resolve.find("window.location = url;").expect("navigation");
    assert!(guard < navigate);

    // Store and fallback navigations only go through resolve().
    assert_eq!(script.matches("window.location = ").count(), 2);
}

#[test]
fn test_script_rules_match_redirect_model() {
    let page = generate(&options());
    let script = script(&page);
    let (focused_arm, unfocused_arm) = timer_arms(script);
    let focus = listener(script, "focus");

    let hidden = BrowserEvent::VisibilityChange(VisibilityState::Hidden);
    let cases = [
        (vec![BrowserEvent::TimerElapsed], Resolution::StoreAfterTimeout),
        (
            vec![BrowserEvent::Blur, BrowserEvent::TimerElapsed],
            Resolution::FallbackAfterTimeout,
        ),
        (vec![hidden, BrowserEvent::Focus], Resolution::FallbackOnReturn),
    ];

    for (events, expected) in cases {
        let mut session = RedirectSession::on_load(&options().urls, "");
        let mut nav = NavigationLog::new();
        session.begin(&mut nav).unwrap();

        let mut resolution = None;
        let mut focused_at_end = true;
        for event in events {
            focused_at_end = session.has_focus();
            resolution = resolution.or(session.handle(event, &mut nav));
        }
        assert_eq!(resolution, Some(expected));

        // The variable the script would navigate to in the same situation.
        let script_var = match expected {
            Resolution::StoreAfterTimeout | Resolution::FallbackAfterTimeout => {
                if focused_at_end {
                    focused_arm
                } else {
                    unfocused_arm
                }
            }
            Resolution::FallbackOnReturn => {
                let call = focus.split("resolve(").nth(1).expect("focus resolves");
                &call[..call.find(')').expect("call end")]
            }
        };

        let targets = session.targets();
        let script_target = match script_var {
            "storeUrl" => &targets.store_url,
            "fallbackUrl" => &targets.fallback_url,
            other => panic!("unexpected script target {other}"),
        };
        assert_eq!(script_target, expected.target(targets), "{expected:?}");
        assert_eq!(nav.last(), Some(script_target.as_str()));
    }
}
