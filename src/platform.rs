//! Operating system detection.
//!
//! Coarse on purpose: one name per OS family and a `(major, minor)` pair
//! where the UA spells one out. Windows reports its NT kernel version, which
//! is mapped back to the marketing release.

use crate::scanner::{scan, ScanResult};
use crate::signatures::{best_match, PLATFORM_SIGNATURES, PLATFORM_VERSION_MARKERS};
use crate::version::{parse_os_version_token, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformName {
    /// Desktop Windows
    Windows,
    /// Windows Phone
    #[serde(rename = "Windows Phone")]
    WindowsPhone,
    /// macOS / OS X
    #[serde(rename = "macOS")]
    MacOs,
    /// iOS and iPadOS
    #[serde(rename = "iOS")]
    Ios,
    /// Android
    Android,
    /// Chrome OS
    #[serde(rename = "Chrome OS")]
    ChromeOs,
    /// Desktop Linux
    Linux,
    /// Not recognized
    #[default]
    Other,
}

impl PlatformName {
    /// Display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlatformName::Windows => "Windows",
            PlatformName::WindowsPhone => "Windows Phone",
            PlatformName::MacOs => "macOS",
            PlatformName::Ios => "iOS",
            PlatformName::Android => "Android",
            PlatformName::ChromeOs => "Chrome OS",
            PlatformName::Linux => "Linux",
            PlatformName::Other => "Other",
        }
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected platform with its version (`0.0` when not stated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Platform {
    /// OS family
    pub name: PlatformName,
    /// OS version
    pub version: Version,
}

/// NT kernel version to Windows release.
const WINDOWS_RELEASES: &[(Version, Version)] = &[
    (Version::new(10, 0), Version::new(10, 0)),
    (Version::new(6, 3), Version::new(8, 1)),
    (Version::new(6, 2), Version::new(8, 0)),
    (Version::new(6, 1), Version::new(7, 0)),
    (Version::new(6, 0), Version::new(6, 0)), // Vista
    (Version::new(5, 2), Version::new(5, 2)), // XP x64 / Server 2003
    (Version::new(5, 1), Version::new(5, 1)), // XP
];

fn windows_release(nt: Version) -> Version {
    WINDOWS_RELEASES
        .iter()
        .find(|(kernel, _)| *kernel == nt)
        .map_or(nt, |(_, release)| *release)
}

/// Detect the platform from an already-scanned user agent.
pub fn detect_platform_scanned(raw: &[u8], scan: &ScanResult) -> Platform {
    let Some(signature) = best_match(PLATFORM_SIGNATURES, scan) else {
        return Platform::default();
    };
    let name = signature.target;

    let version = PLATFORM_VERSION_MARKERS
        .iter()
        .find(|(platform, _)| *platform == name)
        .and_then(|(_, markers)| markers.iter().find_map(|&m| scan.end_of(m)))
        .map(|start| parse_os_version_token(&raw[start..]))
        .unwrap_or_default();

    let version = match name {
        PlatformName::Windows => windows_release(version),
        _ => version,
    };

    Platform { name, version }
}

/// Detect the platform of a raw user agent.
pub fn detect_platform(raw: &str) -> Platform {
    let raw = raw.as_bytes();
    detect_platform_scanned(raw, &scan(raw))
}
