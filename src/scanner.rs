//! Marker scanning over raw user agent bytes.
//!
//! The scanner does not tokenize. It runs one substring search per known
//! [`Marker`] and records where each marker first occurs. Everything
//! downstream (family, bot, mobile, platform, version) works off the
//! resulting [`ScanResult`].
//!
//! ```
//! use fast_browser::scanner::{scan, Marker};
//!
//! let result = scan(b"Mozilla/5.0 (X11; Linux x86_64; rv:40.0) Gecko/20100101 Firefox/40.0");
//! assert!(result.contains(Marker::Firefox));
//! assert_eq!(result.position(Marker::Linux), Some(18));
//! assert!(!result.contains(Marker::Chrome));
//! ```

use memchr::memmem;
use std::sync::LazyLock;

macro_rules! markers {
    ($( $(#[$doc:meta])* $variant:ident => $needle:literal, )*) => {
        /// A substring whose presence drives classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Marker {
            $( $(#[$doc])* $variant, )*
        }

        impl Marker {
            /// Every marker, in discriminant order.
            pub const ALL: &'static [Marker] = &[ $( Marker::$variant, )* ];

            /// Number of distinct markers.
            pub const COUNT: usize = Self::ALL.len();

            /// The literal byte sequence searched for.
            pub const fn needle(self) -> &'static str {
                match self {
                    $( Marker::$variant => $needle, )*
                }
            }
        }
    };
}

markers! {
    // Browser families and their version tokens
    /// Chromium-based Opera
    Opr => "OPR/",
    /// Any Presto-era Opera product
    Opera => "Opera",
    /// Opera Mini product token, carries the real version
    OperaMini => "Opera Mini/",
    /// Opera Mobile, nested inside some Opera Mini UAs
    OperaMobi => "Opera Mobi",
    /// Leading `Opera/` product token
    OperaSlash => "Opera/",
    /// Legacy EdgeHTML Edge
    Edge => "Edge/",
    /// Chromium-based Edge
    Edg => "Edg/",
    /// Edge on Android
    EdgA => "EdgA/",
    /// Edge on iOS
    EdgiOs => "EdgiOS/",
    /// `Chrome/`
    Chrome => "Chrome/",
    /// Chrome on iOS
    CriOs => "CriOS/",
    /// `Chromium/`
    Chromium => "Chromium/",
    /// `Firefox/`
    Firefox => "Firefox/",
    /// Firefox on iOS
    FxiOs => "FxiOS/",
    /// `Safari`
    Safari => "Safari",
    /// Version token used by Safari and Presto Opera
    Version => "Version/",
    /// Mobile build token (`Mobile/10A5355d`)
    MobileBuild => "Mobile/",

    // Device markers
    /// `Mobile`
    Mobile => "Mobile",
    /// `iPad`
    IPad => "iPad",
    /// `iPhone`
    IPhone => "iPhone",
    /// `iPod`
    IPod => "iPod",
    /// `Android`
    Android => "Android",
    /// `Tablet`
    Tablet => "Tablet",
    /// `Windows Phone`
    WindowsPhone => "Windows Phone",
    /// `BlackBerry`
    BlackBerry => "BlackBerry",
    /// `IEMobile`
    IeMobile => "IEMobile",

    // Platforms
    /// `Windows NT `
    WindowsNt => "Windows NT ",
    /// `Windows`
    Windows => "Windows",
    /// `CPU OS 6_0` as sent by iPad
    CpuOs => "CPU OS ",
    /// `CPU iPhone OS 7_0` as sent by iPhone and iPod
    CpuIphoneOs => "CPU iPhone OS ",
    /// `Mac OS X`
    MacOsX => "Mac OS X",
    /// `CrOS`
    CrOs => "CrOS",
    /// Android followed by its version
    AndroidVersion => "Android ",
    /// `Linux`
    Linux => "Linux",

    // Bots
    /// `Googlebot`
    Googlebot => "Googlebot",
    /// `bingbot`
    Bingbot => "bingbot",
    /// `Baiduspider`
    Baiduspider => "Baiduspider",
    /// `DuckDuckBot`
    DuckDuckBot => "DuckDuckBot",
    /// `YandexBot`
    YandexBot => "YandexBot",
    /// `Applebot`
    Applebot => "Applebot",
    /// `Yahoo! Slurp`
    YahooSlurp => "Yahoo! Slurp",
    /// `facebookexternalhit`
    FacebookExternalHit => "facebookexternalhit",
    /// `Twitterbot`
    Twitterbot => "Twitterbot",
    /// `Go-http-client`
    GoHttpClient => "Go-http-client",
}

/// One prebuilt searcher per marker, indexed by discriminant.
static FINDERS: LazyLock<Vec<memmem::Finder<'static>>> = LazyLock::new(|| {
    Marker::ALL
        .iter()
        .map(|marker| memmem::Finder::new(marker.needle()))
        .collect()
});

/// Markers found in a user agent and the byte offset of their first occurrence.
///
/// Fixed-size and `Copy`; building one never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    positions: [Option<usize>; Marker::COUNT],
    scanned_len: usize,
}

impl ScanResult {
    /// A result with no markers, as produced for empty input.
    pub const fn empty() -> Self {
        Self {
            positions: [None; Marker::COUNT],
            scanned_len: 0,
        }
    }

    /// Whether `marker` occurs in the scanned input.
    #[inline]
    pub fn contains(&self, marker: Marker) -> bool {
        self.positions[marker as usize].is_some()
    }

    /// Byte offset of the first occurrence of `marker`.
    #[inline]
    pub fn position(&self, marker: Marker) -> Option<usize> {
        self.positions[marker as usize]
    }

    /// Byte offset just past the first occurrence of `marker`, i.e. where a
    /// version token following it would start.
    #[inline]
    pub fn end_of(&self, marker: Marker) -> Option<usize> {
        self.position(marker).map(|pos| pos + marker.needle().len())
    }

    /// True when every marker in `markers` is present.
    pub fn contains_all(&self, markers: &[Marker]) -> bool {
        markers.iter().all(|&m| self.contains(m))
    }

    /// True when at least one marker in `markers` is present.
    pub fn contains_any(&self, markers: &[Marker]) -> bool {
        markers.iter().any(|&m| self.contains(m))
    }

    /// True when no marker was found.
    pub fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }

    /// Iterate over found markers with their positions, in discriminant order.
    pub fn found(&self) -> impl Iterator<Item = (Marker, usize)> + '_ {
        Marker::ALL
            .iter()
            .filter_map(move |&m| self.position(m).map(|pos| (m, pos)))
    }

    /// Number of input bytes that were searched.
    pub fn scanned_len(&self) -> usize {
        self.scanned_len
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Scan the whole input for markers.
///
/// Total: accepts empty input, binary garbage and invalid UTF-8.
pub fn scan(raw: &[u8]) -> ScanResult {
    scan_prefix(raw, usize::MAX)
}

/// Scan at most the first `max_len` bytes of `raw`.
///
/// A marker straddling the cut-off is not reported.
pub fn scan_prefix(raw: &[u8], max_len: usize) -> ScanResult {
    let haystack = &raw[..raw.len().min(max_len)];
    let mut result = ScanResult {
        positions: [None; Marker::COUNT],
        scanned_len: haystack.len(),
    };

    if haystack.is_empty() {
        return result;
    }

    for (slot, finder) in result.positions.iter_mut().zip(FINDERS.iter()) {
        if finder.needle().len() <= haystack.len() {
            *slot = finder.find(haystack);
        }
    }

    result
}
