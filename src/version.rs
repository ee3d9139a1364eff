//! Version extraction.
//!
//! Parsing is deliberately tolerant: a version token is cut at the first
//! separator (space, `;`, `(`, `)`, `,`), split on its first `.`, and each
//! side contributes its leading digits. Anything unparseable becomes 0.
//!
//! ```
//! use fast_browser::version::{parse_version_token, Version};
//!
//! assert_eq!(parse_version_token(b"40.1"), Version::new(40, 1));
//! assert_eq!(parse_version_token(b"41.0.2228.0 Safari/537.36"), Version::new(41, 0));
//! assert_eq!(parse_version_token(b"9b2.x"), Version::new(9, 0));
//! assert_eq!(parse_version_token(b"garbage"), Version::new(0, 0));
//! ```

use crate::browser::BrowserFamily;
use crate::scanner::{scan, ScanResult};
use crate::signatures::version_token;
use memchr::memchr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(major, minor)` version pair, `0` for missing components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Version {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
}

impl Version {
    /// Construct a version pair.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// True for the `0.0` fallback.
    pub const fn is_unknown(&self) -> bool {
        self.major == 0 && self.minor == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[inline]
fn is_token_end(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b';' | b'(' | b')' | b',')
}

/// Bytes of the token starting at `start`, up to the first separator.
fn token_at(raw: &[u8], start: usize) -> &[u8] {
    let rest = raw.get(start..).unwrap_or_default();
    let end = rest.iter().position(|&b| is_token_end(b)).unwrap_or(rest.len());
    &rest[..end]
}

/// Leading decimal digits of `segment` as a number.
///
/// No digits, or a value that does not fit in `u32`, yields 0.
fn leading_number(segment: &[u8]) -> u32 {
    let mut value: u32 = 0;
    for &byte in segment {
        if !byte.is_ascii_digit() {
            break;
        }
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
        {
            Some(v) => v,
            None => return 0,
        };
    }
    value
}

fn split_version(token: &[u8], separator: Option<usize>) -> Version {
    match separator {
        Some(i) => Version::new(leading_number(&token[..i]), leading_number(&token[i + 1..])),
        None => Version::new(leading_number(token), 0),
    }
}

/// Parse a browser version token such as `40.1` or `41.0.2228.0`.
pub fn parse_version_token(token: &[u8]) -> Version {
    let token = token_at(token, 0);
    split_version(token, memchr(b'.', token))
}

/// Parse an OS version token, which may use `_` (`10_9_3`) or `.` and may be
/// preceded by spaces.
pub fn parse_os_version_token(token: &[u8]) -> Version {
    let start = token.iter().position(|&b| b != b' ').unwrap_or(token.len());
    let token = token_at(token, start);
    split_version(token, token.iter().position(|&b| b == b'.' || b == b'_'))
}

/// Extract the version for an already-scanned user agent.
///
/// Tries the family's version markers in order; the first one present
/// supplies the token.
pub fn extract_version_scanned(raw: &[u8], scan: &ScanResult, family: BrowserFamily) -> Version {
    let Some(rule) = version_token(family) else {
        return Version::default();
    };

    for &marker in rule.markers {
        if let Some(start) = scan.end_of(marker) {
            let version = parse_version_token(&raw[start..]);
            trace_log!("{:?} version {} from {:?}", family, version, marker);
            return version;
        }
    }

    Version::default()
}

/// Extract `family`'s version from a raw user agent.
///
/// Returns `0.0` for [`BrowserFamily::Other`] or when the family's marker is
/// absent. Never fails.
pub fn extract_version(raw: &str, family: BrowserFamily) -> Version {
    let raw = raw.as_bytes();
    extract_version_scanned(raw, &scan(raw), family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_token() {
        for (token, expected) in [
            ("40.1", Version::new(40, 1)),
            ("41.0.2228.0", Version::new(41, 0)),
            ("9.80 (S60; SymbOS", Version::new(9, 80)),
            ("7.0.3 Safari/7046A194A", Version::new(7, 0)),
            ("12.10136", Version::new(12, 10136)),
            ("14", Version::new(14, 0)),
            ("14.", Version::new(14, 0)),
            ("14.3;", Version::new(14, 3)),
            ("10b3.4rc", Version::new(10, 4)),
            ("ADR-1111101157", Version::new(0, 0)),
            (".5", Version::new(0, 5)),
            ("", Version::new(0, 0)),
            ("99999999999.1", Version::new(0, 1)),
        ] {
            assert_eq!(parse_version_token(token.as_bytes()), expected, "{:?}", token);
        }
    }

    #[test]
    fn test_parse_os_version_token() {
        assert_eq!(parse_os_version_token(b" 10_9_3)"), Version::new(10, 9));
        assert_eq!(parse_os_version_token(b"6_0 like Mac OS X"), Version::new(6, 0));
        assert_eq!(parse_os_version_token(b"4.4.2; Nexus 5"), Version::new(4, 4));
        assert_eq!(parse_os_version_token(b")"), Version::new(0, 0));
        assert_eq!(parse_os_version_token(b"   "), Version::new(0, 0));
    }

    #[test]
    fn test_extract_firefox() {
        let ua = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";
        assert_eq!(extract_version(ua, BrowserFamily::Firefox), Version::new(40, 1));
    }

    #[test]
    fn test_extract_chrome() {
        let ua = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36";
        assert_eq!(extract_version(ua, BrowserFamily::Chrome), Version::new(41, 0));
    }

    #[test]
    fn test_extract_opera_mini_follows_nested_token() {
        let ua = "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80 (S60; SymbOS; Opera Mobi/23.348; U; en) Presto/2.5.25 Version/10.54";
        assert_eq!(extract_version(ua, BrowserFamily::Opera), Version::new(9, 80));
    }

    #[test]
    fn test_extract_presto_opera_uses_version_token() {
        let ua = "Opera/9.80 (Windows NT 6.1; WOW64) Presto/2.12.388 Version/12.16";
        assert_eq!(extract_version(ua, BrowserFamily::Opera), Version::new(12, 16));
        let ua = "Opera/9.80 (Android 2.3.3; Linux; Opera Mobi/ADR-1111101157; U; es-ES) Presto/2.9.201 Version/11.50";
        assert_eq!(extract_version(ua, BrowserFamily::Opera), Version::new(11, 50));
    }

    #[test]
    fn test_extract_chromium_opera() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36 OPR/45.0.2552.888";
        assert_eq!(extract_version(ua, BrowserFamily::Opera), Version::new(45, 0));
    }

    #[test]
    fn test_extract_safari() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.75.14 (KHTML, like Gecko) Version/7.0.3 Safari/7046A194A";
        assert_eq!(extract_version(ua, BrowserFamily::Safari), Version::new(7, 0));
    }

    #[test]
    fn test_extract_other_or_missing_marker() {
        assert_eq!(extract_version("abc123", BrowserFamily::Other), Version::default());
        assert_eq!(extract_version("abc123", BrowserFamily::Chrome), Version::default());
        assert_eq!(extract_version("Firefox/", BrowserFamily::Firefox), Version::default());
        assert_eq!(extract_version("", BrowserFamily::Safari), Version::default());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(40, 1).to_string(), "40.1");
        assert!(Version::default().is_unknown());
        assert!(!Version::new(0, 1).is_unknown());
    }
}
