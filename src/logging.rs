//! Logging initialization and configuration.
//!
//! Log output goes to stderr so the generated document can be piped from
//! stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "deeplink_page=info";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `deeplink_page=info`.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init() {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}

/// Try to initialize logging with an explicit filter directive.
///
/// A bare level such as `debug` is scoped to this crate; a `target=level`
/// directive is passed to [`EnvFilter`] as-is. Anything else falls back to
/// the default filter.
pub fn init_with_filter(directive: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = scoped_directive(directive)
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(default_filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}

/// Returns true for a bare level name (error, warn, info, debug, trace, off).
pub fn is_log_level(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "error" | "warn" | "info" | "debug" | "trace" | "off"
    )
}

/// Returns true when `directive` is a level or a parsable `target=level`
/// filter.
pub fn is_valid_filter(directive: &str) -> bool {
    scoped_directive(directive).is_some()
}

fn scoped_directive(directive: &str) -> Option<String> {
    let directive = directive.trim();
    if is_log_level(directive) {
        return Some(format!("deeplink_page={}", directive.to_ascii_lowercase()));
    }

    // A bare word parses as a target with no level, which silences this crate.
    if directive.contains('=') && EnvFilter::try_new(directive).is_ok() {
        Some(directive.to_string())
    } else {
        None
    }
}
