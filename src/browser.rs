//! Browser family classification.

use crate::scanner::ScanResult;
use crate::signatures::{best_match, FAMILY_SIGNATURES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Browser vendor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrowserFamily {
    /// Chrome and Chromium, including Chrome on iOS
    Chrome,
    /// Edge, both EdgeHTML and Chromium based
    Edge,
    /// Firefox, including Firefox on iOS
    Firefox,
    /// Opera, Opera Mini and Chromium-based Opera
    Opera,
    /// Desktop Safari
    Safari,
    /// Safari on iPhone, iPad and iPod
    #[serde(rename = "Mobile Safari")]
    MobileSafari,
    /// No signature matched
    #[default]
    Other,
}

impl BrowserFamily {
    /// Display name, `"Other"` when unresolved.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::Edge => "Edge",
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::Opera => "Opera",
            BrowserFamily::Safari => "Safari",
            BrowserFamily::MobileSafari => "Mobile Safari",
            BrowserFamily::Other => "Other",
        }
    }

    /// True for both desktop and mobile Safari.
    pub const fn is_safari(&self) -> bool {
        matches!(self, BrowserFamily::Safari | BrowserFamily::MobileSafari)
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Chrome" => Ok(BrowserFamily::Chrome),
            "Edge" => Ok(BrowserFamily::Edge),
            "Firefox" => Ok(BrowserFamily::Firefox),
            "Opera" => Ok(BrowserFamily::Opera),
            "Safari" => Ok(BrowserFamily::Safari),
            "Mobile Safari" => Ok(BrowserFamily::MobileSafari),
            "Other" => Ok(BrowserFamily::Other),
            _ => Err(format!("Unknown browser family: {}", s)),
        }
    }
}

/// Resolve the browser family from scanned markers.
///
/// Picks the lowest-ranked matching entry of [`FAMILY_SIGNATURES`], or
/// [`BrowserFamily::Other`] when nothing matches. Deterministic and total.
pub fn classify(scan: &ScanResult) -> BrowserFamily {
    match best_match(FAMILY_SIGNATURES, scan) {
        Some(signature) => {
            trace_log!(
                "family {:?} matched at rank {}",
                signature.target,
                signature.rank
            );
            signature.target
        }
        None => BrowserFamily::Other,
    }
}
