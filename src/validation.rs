//! Embedding-context validation for page values.
//!
//! [`generate`](crate::generate) embeds values without escaping. URLs land
//! inside single-quoted JavaScript strings within a `<script>` element; the
//! title and heading land in HTML text. The validator rejects values that
//! would leave those contexts, and empty URLs, which navigate nowhere.

use std::fmt;

use crate::options::DeepLinkOptions;

/// Configuration field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    IosApp,
    AndroidApp,
    IosStore,
    AndroidStore,
    Fallback,
    PageTitle,
    HeadingText,
}

impl Field {
    /// The field name as it appears in JSON configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Field::IosApp => "iosApp",
            Field::AndroidApp => "androidApp",
            Field::IosStore => "iosStore",
            Field::AndroidStore => "androidStore",
            Field::Fallback => "fallback",
            Field::PageTitle => "pageTitle",
            Field::HeadingText => "headingText",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation configuration.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject empty URL fields.
    pub require_urls: bool,
    /// Maximum length of any single value, in bytes.
    pub max_value_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_urls: true,
            max_value_length: 8192,
        }
    }
}

impl ValidationConfig {
    /// Only check for context breakouts; allow empty and long values.
    pub fn permissive() -> Self {
        Self {
            require_urls: false,
            max_value_length: usize::MAX,
        }
    }
}

/// Checks page values against their embedding contexts.
#[derive(Debug, Default)]
pub struct EmbedValidator {
    config: ValidationConfig,
}

impl EmbedValidator {
    /// Create a new validator with the given config.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate every field of `options`, stopping at the first problem.
    pub fn validate(&self, options: &DeepLinkOptions) -> Result<(), ValidationError> {
        let urls = &options.urls;
        for (field, value) in [
            (Field::IosApp, &urls.ios_app),
            (Field::AndroidApp, &urls.android_app),
            (Field::IosStore, &urls.ios_store),
            (Field::AndroidStore, &urls.android_store),
            (Field::Fallback, &urls.fallback),
        ] {
            self.validate_url(field, value)?;
        }

        self.validate_text(Field::PageTitle, &options.page_title)?;
        self.validate_text(Field::HeadingText, &options.heading_text)?;
        Ok(())
    }

    /// Validate a value embedded in a single-quoted script string.
    pub fn validate_url(&self, field: Field, value: &str) -> Result<(), ValidationError> {
        if self.config.require_urls && value.trim().is_empty() {
            return Err(ValidationError::EmptyUrl(field));
        }
        self.check_length(field, value)?;

        if let Some(c) = value.chars().find(|c| is_script_breaking(*c)) {
            return Err(ValidationError::InvalidCharacter { field, found: c });
        }

        let lower = value.to_ascii_lowercase();
        for pattern in ["</script", "<!--"] {
            if lower.contains(pattern) {
                return Err(ValidationError::MarkupSequence {
                    field,
                    pattern: pattern.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Validate a value embedded as HTML text.
    pub fn validate_text(&self, field: Field, value: &str) -> Result<(), ValidationError> {
        self.check_length(field, value)?;

        if value.contains('<') {
            return Err(ValidationError::InvalidCharacter { field, found: '<' });
        }
        Ok(())
    }

    fn check_length(&self, field: Field, value: &str) -> Result<(), ValidationError> {
        if value.len() > self.config.max_value_length {
            return Err(ValidationError::TooLong {
                field,
                length: value.len(),
                max: self.config.max_value_length,
            });
        }
        Ok(())
    }
}

/// Characters that end or corrupt a single-quoted JavaScript string literal.
fn is_script_breaking(c: char) -> bool {
    matches!(c, '\'' | '\\' | '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required URL is empty.
    EmptyUrl(Field),
    /// Value contains a character that breaks out of its context.
    InvalidCharacter { field: Field, found: char },
    /// Value contains a markup sequence that ends the script element.
    MarkupSequence { field: Field, pattern: String },
    /// Value exceeds the configured maximum length.
    TooLong {
        field: Field,
        length: usize,
        max: usize,
    },
}

impl ValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyUrl(field)
            | Self::InvalidCharacter { field, .. }
            | Self::MarkupSequence { field, .. }
            | Self::TooLong { field, .. } => *field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl(field) => write!(f, "{} must not be empty", field),
            Self::InvalidCharacter { field, found } => {
                write!(f, "{} contains invalid character: {:?}", field, found)
            }
            Self::MarkupSequence { field, pattern } => {
                write!(f, "{} contains markup sequence: {}", field, pattern)
            }
            Self::TooLong { field, length, max } => {
                write!(f, "{} too long: {} bytes (max: {})", field, length, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
