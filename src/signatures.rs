//! Static detection tables.
//!
//! Every table is plain `'static` data, never mutated, so any number of
//! threads can read it without synchronization. Precedence is carried by
//! each signature's `rank` because vendors overlap: Chrome UAs carry a
//! `Safari` token, Edge and Opera UAs carry `Chrome/`, iOS UAs say
//! `like Mac OS X`. Rows are listed in rank order.

use crate::bot::BotName;
use crate::browser::BrowserFamily;
use crate::platform::PlatformName;
use crate::scanner::{Marker, ScanResult};

/// A detection rule: all `required` markers present, no `excluded` marker present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<T> {
    /// What a match resolves to
    pub target: T,
    /// Markers that must all be present
    pub required: &'static [Marker],
    /// Markers that must all be absent
    pub excluded: &'static [Marker],
    /// Precedence among matching signatures, lower wins
    pub rank: u16,
}

impl<T> Signature<T> {
    /// Whether this signature matches the scanned markers.
    #[inline]
    pub fn matches(&self, scan: &ScanResult) -> bool {
        !self.required.is_empty()
            && scan.contains_all(self.required)
            && !scan.contains_any(self.excluded)
    }
}

/// Browser family signature
pub type FamilySignature = Signature<BrowserFamily>;
/// Bot signature
pub type BotSignature = Signature<BotName>;
/// Platform signature
pub type PlatformSignature = Signature<PlatformName>;

/// Return the matching signature with the lowest rank.
///
/// Ties go to the earlier entry. Tables are kept in rank order for
/// readability, but the result does not depend on it.
pub fn best_match<'t, T>(
    table: &'t [Signature<T>],
    scan: &ScanResult,
) -> Option<&'t Signature<T>> {
    table
        .iter()
        .filter(|sig| sig.matches(scan))
        .min_by_key(|sig| sig.rank)
}

const fn sig<T>(
    target: T,
    required: &'static [Marker],
    excluded: &'static [Marker],
    rank: u16,
) -> Signature<T> {
    Signature {
        target,
        required,
        excluded,
        rank,
    }
}

/// Chromium derivatives that also send a Safari compatibility token.
const CHROMIUM_TOKENS: &[Marker] = &[Marker::Chrome, Marker::CriOs, Marker::Chromium];

/// Markers that disqualify a UA from being genuine Safari.
const NOT_SAFARI: &[Marker] = &[
    Marker::Chrome,
    Marker::CriOs,
    Marker::Chromium,
    Marker::FxiOs,
    Marker::Android,
];

/// Browser family signatures in precedence order.
///
/// Opera and Edge both embed `Chrome/` so they come first; Chrome comes
/// before Safari because every Chrome UA carries `Safari/`.
pub static FAMILY_SIGNATURES: &[FamilySignature] = &[
    sig(BrowserFamily::Opera, &[Marker::Opr], &[], 10),
    sig(BrowserFamily::Opera, &[Marker::Opera], &[], 11),
    sig(BrowserFamily::Edge, &[Marker::Edge], &[], 20),
    sig(BrowserFamily::Edge, &[Marker::Edg], &[], 21),
    sig(BrowserFamily::Edge, &[Marker::EdgA], &[], 22),
    sig(BrowserFamily::Edge, &[Marker::EdgiOs], &[], 23),
    sig(BrowserFamily::Chrome, &[Marker::Chrome], &[], 30),
    sig(BrowserFamily::Chrome, &[Marker::CriOs], &[], 31),
    sig(BrowserFamily::Chrome, &[Marker::Chromium], &[], 32),
    sig(BrowserFamily::Firefox, &[Marker::Firefox], &[], 40),
    sig(BrowserFamily::Firefox, &[Marker::FxiOs], &[], 41),
    sig(
        BrowserFamily::MobileSafari,
        &[Marker::Safari, Marker::Version, Marker::MobileBuild],
        NOT_SAFARI,
        50,
    ),
    sig(
        BrowserFamily::Safari,
        &[Marker::Safari, Marker::Version],
        NOT_SAFARI,
        51,
    ),
];

/// Bot signatures in precedence order.
///
/// Crawlers routinely impersonate a browser in the rest of the UA, which is
/// why bot detection runs as its own pass.
pub static BOT_SIGNATURES: &[BotSignature] = &[
    sig(BotName::Googlebot, &[Marker::Googlebot], &[], 10),
    sig(BotName::Bingbot, &[Marker::Bingbot], &[], 20),
    sig(BotName::Baidu, &[Marker::Baiduspider], &[], 30),
    sig(BotName::DuckDuckBot, &[Marker::DuckDuckBot], &[], 40),
    sig(BotName::YandexBot, &[Marker::YandexBot], &[], 50),
    sig(BotName::Applebot, &[Marker::Applebot], &[], 60),
    sig(BotName::YahooSlurp, &[Marker::YahooSlurp], &[], 70),
    sig(
        BotName::FacebookExternalHit,
        &[Marker::FacebookExternalHit],
        &[],
        80,
    ),
    sig(BotName::Twitterbot, &[Marker::Twitterbot], &[], 90),
    sig(BotName::Go, &[Marker::GoHttpClient], &[], 100),
];

/// Platform signatures in precedence order.
pub static PLATFORM_SIGNATURES: &[PlatformSignature] = &[
    sig(PlatformName::WindowsPhone, &[Marker::WindowsPhone], &[], 10),
    sig(PlatformName::Windows, &[Marker::WindowsNt], &[], 20),
    sig(PlatformName::Windows, &[Marker::Windows], &[], 21),
    sig(PlatformName::Ios, &[Marker::IPhone], &[], 30),
    sig(PlatformName::Ios, &[Marker::IPad], &[], 31),
    sig(PlatformName::Ios, &[Marker::IPod], &[], 32),
    sig(PlatformName::ChromeOs, &[Marker::CrOs], &[], 40),
    sig(PlatformName::Android, &[Marker::Android], &[], 50),
    sig(PlatformName::MacOs, &[Marker::MacOsX], &[], 60),
    sig(PlatformName::Linux, &[Marker::Linux], &[], 70),
];

/// Where to find the version of a resolved browser family.
///
/// Markers are tried in order and the first one present wins. Listing a
/// nested product token ahead of the outer one is how redirection works:
/// Opera Mini reports `Opera/9.80` up front but its own `Opera Mini/`
/// token is the one that counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionToken {
    /// Family this rule applies to
    pub family: BrowserFamily,
    /// Candidate markers, most specific first
    pub markers: &'static [Marker],
}

/// Version token rules, one per family.
pub static VERSION_TOKENS: &[VersionToken] = &[
    VersionToken {
        family: BrowserFamily::Opera,
        markers: &[
            Marker::Opr,
            Marker::OperaMini,
            Marker::Version,
            Marker::OperaSlash,
        ],
    },
    VersionToken {
        family: BrowserFamily::Edge,
        markers: &[Marker::Edge, Marker::Edg, Marker::EdgA, Marker::EdgiOs],
    },
    VersionToken {
        family: BrowserFamily::Chrome,
        markers: CHROMIUM_TOKENS,
    },
    VersionToken {
        family: BrowserFamily::Firefox,
        markers: &[Marker::Firefox, Marker::FxiOs],
    },
    VersionToken {
        family: BrowserFamily::MobileSafari,
        markers: &[Marker::Version],
    },
    VersionToken {
        family: BrowserFamily::Safari,
        markers: &[Marker::Version],
    },
];

/// Look up the version rule for `family`. `Other` has none.
pub fn version_token(family: BrowserFamily) -> Option<&'static VersionToken> {
    VERSION_TOKENS.iter().find(|token| token.family == family)
}

/// Markers that flag a phone, tablet or mobile OS.
pub static MOBILE_MARKERS: &[Marker] = &[
    Marker::Mobile,
    Marker::IPad,
    Marker::IPhone,
    Marker::IPod,
    Marker::Android,
    Marker::Tablet,
    Marker::WindowsPhone,
    Marker::BlackBerry,
    Marker::IeMobile,
    Marker::OperaMini,
    Marker::OperaMobi,
];

/// OS version markers per platform, most specific first.
pub static PLATFORM_VERSION_MARKERS: &[(PlatformName, &[Marker])] = &[
    (PlatformName::WindowsPhone, &[Marker::WindowsPhone]),
    (PlatformName::Windows, &[Marker::WindowsNt]),
    (PlatformName::Ios, &[Marker::CpuIphoneOs, Marker::CpuOs]),
    (PlatformName::Android, &[Marker::AndroidVersion]),
    (PlatformName::MacOs, &[Marker::MacOsX]),
];
