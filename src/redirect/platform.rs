//! Platform classification from a user-agent string.

/// Tokens that mark an Apple mobile device.
const IOS_TOKENS: [&str; 3] = ["iPad", "iPhone", "iPod"];

/// Token that disqualifies a user agent from the iOS path, even when an
/// Apple token is present (desktop emulation strings).
const DESKTOP_TOKEN: &str = "Windows";

/// The only distinction the redirect makes between devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    /// Everything else, including desktops; uses the Android URLs.
    Other,
}

impl Platform {
    /// Classify a user agent.
    pub fn detect(user_agent: &str) -> Self {
        if is_ios(user_agent) {
            Platform::Ios
        } else {
            Platform::Other
        }
    }

    pub fn is_ios(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

/// Returns true when the user agent contains `iPad`, `iPhone` or `iPod`
/// and does not contain `Windows`. Matching is case-sensitive.
pub fn is_ios(user_agent: &str) -> bool {
    IOS_TOKENS.iter().any(|token| user_agent.contains(token)) && !user_agent.contains(DESKTOP_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";

    #[test]
    fn test_iphone_is_ios() {
        assert!(is_ios(IPHONE_SAFARI));
        assert_eq!(Platform::detect(IPHONE_SAFARI), Platform::Ios);
    }

    #[test]
    fn test_ipad_and_ipod() {
        assert!(is_ios("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)"));
        assert!(is_ios("Mozilla/5.0 (iPod touch; CPU iPhone OS 12_0)"));
    }

    #[test]
    fn test_windows_excludes_ios() {
        assert!(!is_ios("Mozilla/5.0 (Windows NT 10.0; iPhone emulation)"));
        assert_eq!(Platform::detect("iPhone Windows Phone"), Platform::Other);
    }

    #[test]
    fn test_android_and_empty() {
        assert!(!is_ios(ANDROID_CHROME));
        assert!(!is_ios(""));
        assert!(!Platform::detect("").is_ios());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_ios("iphone"));
        assert!(!is_ios("IPAD"));
    }
}
