//! Video link validation.
//!
//! Purely syntactic: a link is accepted when it looks like
//! `[http[s]://][www.]<host>/<something>` for one of the supported video hosts.
//! Nothing is fetched and the path is never checked against a real resource.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// Scheme and host fold case as ASCII only (`(?-u:...)`); Unicode folding
// would let `ſ` stand in for `s` and the Kelvin sign for `k`.
const PERMISSIVE_PATTERN: &str = r"(?i)^(?-u:(?:https?://)?(?:www\.)?(youtube\.com|youtu\.?be(?:\.be)?|instagram\.com|tiktok\.com)/).+$";
const STRICT_PATTERN: &str = r"(?i)^(?-u:(?:https?://)?(?:www\.)?(youtube\.com|youtu\.be|instagram\.com|tiktok\.com)/).+$";

static PERMISSIVE: OnceLock<Regex> = OnceLock::new();
static STRICT: OnceLock<Regex> = OnceLock::new();

/// Which host pattern the validator enforces.
///
/// `Permissive` keeps the historical shape where the period in `youtu.be` is
/// optional, so `youtube/...` and `youtube.be/...` pass as well. `Strict` only
/// accepts the four real domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPattern {
    #[default]
    Permissive,
    Strict,
}

impl HostPattern {
    fn regex(self) -> &'static Regex {
        match self {
            HostPattern::Permissive => PERMISSIVE.get_or_init(|| {
                Regex::new(PERMISSIVE_PATTERN).expect("permissive link pattern compiles")
            }),
            HostPattern::Strict => STRICT
                .get_or_init(|| Regex::new(STRICT_PATTERN).expect("strict link pattern compiles")),
        }
    }
}

/// Video platform a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoHost {
    YouTube,
    Instagram,
    TikTok,
}

impl VideoHost {
    fn from_fragment(fragment: &str) -> Option<Self> {
        let lower = fragment.to_ascii_lowercase();
        if lower.starts_with("youtu") {
            Some(VideoHost::YouTube)
        } else if lower.starts_with("instagram") {
            Some(VideoHost::Instagram)
        } else if lower.starts_with("tiktok") {
            Some(VideoHost::TikTok)
        } else {
            None
        }
    }
}

impl fmt::Display for VideoHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VideoHost::YouTube => "YouTube",
            VideoHost::Instagram => "Instagram",
            VideoHost::TikTok => "TikTok",
        };
        f.write_str(name)
    }
}

/// Link validator bound to one [`HostPattern`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkValidator {
    pattern: HostPattern,
}

impl LinkValidator {
    pub fn new(pattern: HostPattern) -> Self {
        Self { pattern }
    }

    /// Returns true when `text` is a structurally valid link to a supported host.
    pub fn validate(&self, text: &str) -> bool {
        self.pattern.regex().is_match(text)
    }

    /// Like [`validate`](Self::validate) but also reports which host matched.
    pub fn classify(&self, text: &str) -> Option<VideoHost> {
        let caps = self.pattern.regex().captures(text)?;
        VideoHost::from_fragment(caps.get(1)?.as_str())
    }
}

/// Validates `text` with the default (permissive) pattern.
pub fn validate(text: &str) -> bool {
    LinkValidator::default().validate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_hosts_with_scheme_and_www() {
        for link in [
            "https://www.youtube.com/watch?v=abc",
            "http://youtube.com/shorts/xyz",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.be/abc",
            "https://www.instagram.com/reel/C0abc123/",
            "http://tiktok.com/@chef/video/123",
        ] {
            assert!(validate(link), "expected valid: {link}");
        }
    }

    #[test]
    fn scheme_and_www_are_optional() {
        assert!(validate("youtube.com/watch?v=abc"));
        assert!(validate("www.instagram.com/p/xyz"));
        assert!(validate("tiktok.com/x"));
    }

    #[test]
    fn case_insensitive() {
        assert!(validate("HTTPS://WWW.YOUTUBE.COM/WATCH?V=ABC"));
        assert!(validate("https://TikTok.com/@a/video/1"));
    }

    #[test]
    fn rejects_unsupported_or_malformed() {
        for link in [
            "",
            "ftp://example.com/video",
            "https://example.com/watch?v=abc",
            "https://vimeo.com/12345",
            "https://www.youtube.com",
            "https://www.youtube.com/",
            "ftp://youtube.com/watch",
            "https://m.youtube.com/watch?v=abc",
            "not a link at all",
        ] {
            assert!(!validate(link), "expected invalid: {link:?}");
        }
    }

    #[test]
    fn permissive_pattern_accepts_missing_period_in_youtu_be() {
        assert!(validate("https://youtube/watch"));
        let strict = LinkValidator::new(HostPattern::Strict);
        assert!(!strict.validate("https://youtube/watch"));
        assert!(!strict.validate("https://youtube.be/watch"));
        assert!(strict.validate("https://youtu.be/watch"));
        assert!(strict.validate("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn classify_reports_host() {
        let v = LinkValidator::default();
        assert_eq!(
            v.classify("https://www.youtube.com/watch?v=abc"),
            Some(VideoHost::YouTube)
        );
        assert_eq!(v.classify("youtu.be/abc"), Some(VideoHost::YouTube));
        assert_eq!(
            v.classify("https://www.Instagram.com/reel/x"),
            Some(VideoHost::Instagram)
        );
        assert_eq!(v.classify("tiktok.com/@a/video/1"), Some(VideoHost::TikTok));
        assert_eq!(v.classify("ftp://example.com/video"), None);
    }

    #[test]
    fn unicode_case_folds_do_not_stand_in_for_ascii() {
        let strict = LinkValidator::new(HostPattern::Strict);
        for link in [
            "https://www.in\u{17f}tagram.com/reel/x",
            "https://ti\u{212a}tok.com/@a/video/1",
            "http\u{17f}://youtube.com/watch",
        ] {
            assert!(!validate(link), "expected invalid: {link:?}");
            assert!(!strict.validate(link), "expected invalid: {link:?}");
            assert_eq!(LinkValidator::default().classify(link), None);
        }
        // Non-ASCII is still fine in the path.
        assert!(validate("https://www.instagram.com/reel/caf\u{e9}"));
    }

    #[test]
    fn validate_and_classify_agree() {
        for pattern in [HostPattern::Permissive, HostPattern::Strict] {
            let v = LinkValidator::new(pattern);
            for link in [
                "https://www.youtube.com/watch?v=abc",
                "HTTPS://YOUTU.BE/abc",
                "https://youtube/watch",
                "https://www.in\u{17f}tagram.com/reel/x",
                "https://ti\u{212a}tok.com/@a/video/1",
                "TikTok.com/@a/video/1",
                "ftp://example.com/video",
                "",
            ] {
                assert_eq!(
                    v.validate(link),
                    v.classify(link).is_some(),
                    "{pattern:?} disagrees on {link:?}"
                );
            }
        }
    }

    #[test]
    fn rejects_multiline_input() {
        assert!(!validate("https://youtu.be/abc\nhttps://evil.example/"));
    }
}
