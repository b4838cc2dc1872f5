//! Redirect heuristic.
//!
//! A Rust model of the script embedded in every generated page: classify the
//! platform once, attempt the app-scheme navigation, then let focus and
//! visibility signals race a fixed timer to decide between the store and the
//! fallback URL.
//!
//! The browser is injected as capabilities: a [`Navigator`] receives every
//! navigation, [`BrowserEvent`]s arrive on a channel, and the timer is a
//! tokio sleep, so the whole race can run under a paused test clock.

mod platform;
mod runner;
mod session;
mod state;

pub use platform::{is_ios, Platform};
pub use runner::{RedirectReport, RedirectRunner, REDIRECT_TIMEOUT};
pub use session::{
    BrowserEvent, NavigationLog, Navigator, RedirectSession, RedirectTargets, Resolution,
    VisibilityState,
};
pub use state::RedirectState;
