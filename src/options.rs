//! Page configuration.
//!
//! Field names serialize in camelCase (`iosApp`, `pageTitle`, ...) so a JSON
//! configuration reads the same as the values embedded in the page script.

use serde::{Deserialize, Serialize};

/// The five navigation targets a deep-link page chooses between.
///
/// Values are opaque and never validated here; a missing field
/// deserializes to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppUrls {
    /// Custom-scheme URL that opens the iOS app.
    pub ios_app: String,
    /// Custom-scheme URL that opens the Android app.
    pub android_app: String,
    /// App Store listing.
    pub ios_store: String,
    /// Play Store listing.
    pub android_store: String,
    /// Web URL used when neither the app nor a store redirect applies.
    pub fallback: String,
}

impl AppUrls {
    pub fn new(
        ios_app: impl Into<String>,
        android_app: impl Into<String>,
        ios_store: impl Into<String>,
        android_store: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            ios_app: ios_app.into(),
            android_app: android_app.into(),
            ios_store: ios_store.into(),
            android_store: android_store.into(),
            fallback: fallback.into(),
        }
    }
}

/// Everything needed to generate one deep-link page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeepLinkOptions {
    /// Navigation targets.
    pub urls: AppUrls,
    /// Contents of `<title>`; empty by default.
    pub page_title: String,
    /// Contents of the `<h1>`; empty by default.
    pub heading_text: String,
}

impl DeepLinkOptions {
    /// Options with the given URLs and an empty title and heading.
    pub fn new(urls: AppUrls) -> Self {
        Self {
            urls,
            ..Self::default()
        }
    }

    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = title.into();
        self
    }

    pub fn with_heading_text(mut self, heading: impl Into<String>) -> Self {
        self.heading_text = heading.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_urls() -> AppUrls {
        AppUrls::new(
            "myapp://open",
            "intent://open",
            "https://apps.apple.com/app/id1",
            "https://play.google.com/store/apps/details?id=x",
            "https://example.com",
        )
    }

    #[test]
    fn test_defaults_are_empty() {
        let options = DeepLinkOptions::new(sample_urls());
        assert_eq!(options.page_title, "");
        assert_eq!(options.heading_text, "");
    }

    #[test]
    fn test_builder() {
        let options = DeepLinkOptions::new(sample_urls())
            .with_page_title("Open")
            .with_heading_text("Redirecting...");
        assert_eq!(options.page_title, "Open");
        assert_eq!(options.heading_text, "Redirecting...");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "urls": {
                "iosApp": "myapp://a",
                "androidApp": "myapp://b",
                "iosStore": "https://apps.apple.com/x",
                "androidStore": "https://play.google.com/x",
                "fallback": "https://example.com"
            },
            "pageTitle": "Title"
        }"#;

        let options: DeepLinkOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.urls.ios_app, "myapp://a");
        assert_eq!(options.urls.android_store, "https://play.google.com/x");
        assert_eq!(options.page_title, "Title");
        assert_eq!(options.heading_text, "");
    }

    #[test]
    fn test_missing_url_fields_default_empty() {
        let json = r#"{ "urls": { "iosApp": "myapp://a" } }"#;

        let options: DeepLinkOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.urls.ios_app, "myapp://a");
        assert_eq!(options.urls.fallback, "");
    }

    #[test]
    fn test_serialize_field_names() {
        let json = serde_json::to_string(&DeepLinkOptions::new(sample_urls())).unwrap();
        assert!(json.contains("\"iosApp\""));
        assert!(json.contains("\"androidStore\""));
        assert!(json.contains("\"headingText\""));
    }
}
