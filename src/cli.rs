//! Command-line interface for deeplink-page.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    /// iOS app URL.
    pub ios_app: Option<String>,
    /// Android app URL.
    pub android_app: Option<String>,
    /// App Store URL.
    pub ios_store: Option<String>,
    /// Play Store URL.
    pub android_store: Option<String>,
    /// Fallback URL.
    pub fallback: Option<String>,
    /// Page title.
    pub title: Option<String>,
    /// Heading text.
    pub heading: Option<String>,
    /// Reject values that are unsafe to embed.
    pub strict: bool,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('o') | Long("output") => {
                result.output = Some(parser.value()?.parse()?);
            }
            Long("ios-app") => {
                result.ios_app = Some(parser.value()?.parse()?);
            }
            Long("android-app") => {
                result.android_app = Some(parser.value()?.parse()?);
            }
            Long("ios-store") => {
                result.ios_store = Some(parser.value()?.parse()?);
            }
            Long("android-store") => {
                result.android_store = Some(parser.value()?.parse()?);
            }
            Long("fallback") => {
                result.fallback = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("title") => {
                result.title = Some(parser.value()?.parse()?);
            }
            Long("heading") => {
                result.heading = Some(parser.value()?.parse()?);
            }
            Long("strict") => {
                result.strict = true;
            }
            Short('l') | Long("log-level") => {
                let value: String = parser.value()?.parse()?;
                if !crate::logging::is_log_level(&value) {
                    return Err(ArgsError::InvalidValue("log-level", value));
                }
                result.log_level = Some(value);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"deeplink-page {version}
Generate an HTML page that opens a native app, its store, or a fallback URL

USAGE:
    deeplink-page [OPTIONS]

OPTIONS:
    -c, --config <FILE>           Path to configuration file (JSON)
    -o, --output <FILE>           Write the page to FILE [default: stdout]
        --ios-app <URL>           Custom-scheme URL for the iOS app
        --android-app <URL>       Custom-scheme URL for the Android app
        --ios-store <URL>         App Store URL
        --android-store <URL>     Play Store URL
        --fallback <URL>          Web fallback URL
    -t, --title <TEXT>            Page title
        --heading <TEXT>          Heading text
        --strict                  Reject values that are unsafe to embed
    -l, --log-level <LVL>         Log level (error, warn, info, debug, trace)
    -h, --help                    Print help
    -V, --version                 Print version

ENVIRONMENT VARIABLES:
    DEEPLINK_IOS_APP              iOS app URL (overrides config)
    DEEPLINK_ANDROID_APP          Android app URL (overrides config)
    DEEPLINK_IOS_STORE            App Store URL (overrides config)
    DEEPLINK_ANDROID_STORE        Play Store URL (overrides config)
    DEEPLINK_FALLBACK             Fallback URL (overrides config)
    DEEPLINK_PAGE_TITLE           Page title (overrides config)
    DEEPLINK_HEADING_TEXT         Heading text (overrides config)
    DEEPLINK_OUTPUT               Output file (overrides config)
    DEEPLINK_LOG_LEVEL            Log level (overrides config)
    RUST_LOG                      Alternative log level setting

EXAMPLES:
    # Generate from a config file
    deeplink-page -c deeplink.json -o open.html

    # Everything on the command line
    deeplink-page --ios-app myapp://x --android-app myapp://x \
        --ios-store https://apps.apple.com/app/id1 \
        --android-store https://play.google.com/store/apps/details?id=x \
        --fallback https://example.com --strict
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("deeplink-page {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
