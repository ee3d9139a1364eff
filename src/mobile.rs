//! Mobile device detection.

use crate::scanner::{scan, ScanResult};
use crate::signatures::MOBILE_MARKERS;

/// Whether scanned markers include any phone, tablet or mobile-OS marker.
#[inline]
pub fn is_mobile_scanned(scan: &ScanResult) -> bool {
    scan.contains_any(MOBILE_MARKERS)
}

/// Whether `raw` carries a mobile marker.
///
/// Independent of family and bot classification: an unknown browser or a
/// crawler can still be mobile.
pub fn is_mobile(raw: &str) -> bool {
    is_mobile_scanned(&scan(raw.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipad_is_mobile() {
        assert!(is_mobile("Mozilla/5.0 (iPad; CPU OS 6_0 like Mac OS X) AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5355d Safari/8536.25"));
    }

    #[test]
    fn test_desktop_is_not_mobile() {
        assert!(!is_mobile("Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1"));
        assert!(!is_mobile("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"));
        assert!(!is_mobile("abc123"));
        assert!(!is_mobile(""));
    }

    #[test]
    fn test_other_mobile_markers() {
        assert!(is_mobile("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80 (S60; SymbOS; Opera Mobi/23.348; U; en) Presto/2.5.25 Version/10.54"));
        assert!(is_mobile("Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/32.0.1700.99 Mobile Safari/537.36"));
        assert!(is_mobile("Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; Trident/6.0; IEMobile/10.0; ARM; Touch; NOKIA; Lumia 920)"));
        assert!(is_mobile("BlackBerry9700/5.0.0.862 Profile/MIDP-2.1 Configuration/CLDC-1.1"));
    }

    #[test]
    fn test_unknown_family_can_be_mobile() {
        assert!(is_mobile("SomeApp/1.0 (iPhone)"));
    }
}
