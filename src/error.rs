//! Error types for deeplink-page.

use thiserror::Error;

/// Main error type for deeplink-page operations.
#[derive(Error, Debug)]
pub enum DeepLinkError {
    /// Invalid redirect state transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: crate::redirect::RedirectState,
        to: crate::redirect::RedirectState,
    },

    /// A configuration value cannot be embedded safely.
    #[error("unsafe value: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Command-line arguments could not be parsed.
    #[error("argument error: {0}")]
    Args(#[from] crate::cli::ArgsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for deeplink-page operations.
pub type Result<T> = std::result::Result<T, DeepLinkError>;
