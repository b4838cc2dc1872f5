//! # deeplink-page
//!
//! Generates self-contained HTML pages that open a native app through its
//! custom URL scheme, send the user to the platform's store when the app is
//! not installed, and fall back to a web URL otherwise.
//!
//! The page's script decides by racing a 3 second timer against the
//! browser's blur, focus and visibility signals. The same heuristic is
//! modelled in [`redirect`] so it can be exercised without a browser.
//!
//! ## Features
//!
//! - **Pure generation**: identical options always yield identical pages
//! - **Opt-in validation**: reject values that would break out of the page
//! - **Testable redirect model**: injected navigator, events and timer
//!
//! ## Quick Start
//!
//! ```
//! use deeplink_page::{generate, AppUrls, DeepLinkOptions};
//!
//! let options = DeepLinkOptions::new(AppUrls::new(
//!     "myapp://x",
//!     "myapp://x",
//!     "https://apps.apple.com/x",
//!     "https://play.google.com/x",
//!     "https://example.com",
//! ))
//! .with_page_title("Open in app");
//!
//! let page = generate(&options);
//! assert!(page.contains("<title>Open in app</title>"));
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod options;
pub mod redirect;
pub mod validation;

// Re-export commonly used types
pub use document::{generate, generate_checked};
pub use error::{DeepLinkError, Result};
pub use options::{AppUrls, DeepLinkOptions};
pub use redirect::{
    is_ios, BrowserEvent, NavigationLog, Navigator, Platform, RedirectReport, RedirectRunner,
    RedirectSession, RedirectState, Resolution, VisibilityState, REDIRECT_TIMEOUT,
};
pub use validation::{EmbedValidator, ValidationConfig, ValidationError};
