//! Parsed user agents.
//!
//! [`Parser::classify`] runs the whole pipeline (scan, family, version, bot,
//! mobile, platform) and yields a `Copy` [`Classification`] without touching
//! the heap. [`UserAgent`] pairs that with an owned copy of the input and is
//! the type handed across the C boundary.
//!
//! ```
//! use fast_browser::{BrowserFamily, UserAgent};
//!
//! let ua = UserAgent::parse(
//!     "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1",
//! );
//! assert_eq!(ua.family(), BrowserFamily::Firefox);
//! assert_eq!((ua.major_version(), ua.minor_version()), (40, 1));
//! assert!(!ua.is_mobile());
//! assert!(!ua.is_bot());
//! ```

use crate::bot::{detect_bot, BotName};
use crate::browser::{classify, BrowserFamily};
use crate::error::Result;
use crate::mobile::is_mobile_scanned;
use crate::platform::{detect_platform_scanned, Platform};
use crate::scanner::scan_prefix;
use crate::version::{extract_version_scanned, Version};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default number of leading bytes searched for markers: the whole input.
///
/// Padding must not push a marker out of sight, so bounding the scan is an
/// explicit choice made through [`ParserBuilder::max_scan_length`].
pub const DEFAULT_MAX_SCAN_LENGTH: usize = usize::MAX;

/// Everything learned about a user agent, independent of the input's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Resolved browser family
    pub family: BrowserFamily,
    /// Browser version, `0.0` when unknown
    pub version: Version,
    /// Detected bot, if any
    pub bot: Option<BotName>,
    /// Whether a mobile marker was present
    pub mobile: bool,
    /// Detected operating system
    pub platform: Platform,
}

impl Classification {
    /// Whether a bot signature matched.
    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }

    /// Bot display name, empty when not a bot.
    pub fn bot_name(&self) -> &'static str {
        self.bot.map_or("", |bot| bot.as_str())
    }
}

/// Builder for [`Parser`]
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    max_scan_length: usize,
    detect_bots: bool,
    detect_platform: bool,
}

impl ParserBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            max_scan_length: DEFAULT_MAX_SCAN_LENGTH,
            detect_bots: true,
            detect_platform: true,
        }
    }

    /// Only search the first `len` bytes for markers.
    ///
    /// Unbounded by default. A bounded parser misses any marker that starts
    /// past `len`, so input padded ahead of a bot token classifies as a
    /// plain browser. The full input is still stored and returned verbatim.
    pub fn max_scan_length(mut self, len: usize) -> Self {
        self.max_scan_length = len;
        self
    }

    /// Enable or disable bot detection
    pub fn detect_bots(mut self, enable: bool) -> Self {
        self.detect_bots = enable;
        self
    }

    /// Enable or disable platform detection
    pub fn detect_platform(mut self, enable: bool) -> Self {
        self.detect_platform = enable;
        self
    }

    /// Build the parser
    pub fn build(self) -> Parser {
        Parser {
            max_scan_length: self.max_scan_length,
            detect_bots: self.detect_bots,
            detect_platform: self.detect_platform,
        }
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configured user agent parser.
///
/// Holds only configuration; cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    max_scan_length: usize,
    detect_bots: bool,
    detect_platform: bool,
}

impl Parser {
    /// Parser with default configuration.
    pub fn new() -> Self {
        ParserBuilder::new().build()
    }

    /// Start configuring a parser.
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    /// Classify raw user agent bytes.
    ///
    /// Total: empty, garbage and non-UTF-8 input resolve to defaults.
    pub fn classify(&self, raw: &[u8]) -> Classification {
        let scan = scan_prefix(raw, self.max_scan_length);
        let family = classify(&scan);

        Classification {
            family,
            version: extract_version_scanned(raw, &scan, family),
            bot: if self.detect_bots { detect_bot(&scan) } else { None },
            mobile: is_mobile_scanned(&scan),
            platform: if self.detect_platform {
                detect_platform_scanned(raw, &scan)
            } else {
                Platform::default()
            },
        }
    }

    /// Parse into an owned [`UserAgent`].
    pub fn parse(&self, raw: &str) -> UserAgent {
        UserAgent {
            source: raw.to_owned(),
            info: self.classify(raw.as_bytes()),
        }
    }

    /// Parse many user agents in parallel.
    pub fn parse_batch<S>(&self, inputs: &[S]) -> Vec<UserAgent>
    where
        S: AsRef<str> + Sync,
    {
        inputs.par_iter().map(|raw| self.parse(raw.as_ref())).collect()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed user agent: the verbatim input plus its classification.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserAgent {
    #[serde(rename = "user_agent")]
    source: String,
    #[serde(flatten)]
    info: Classification,
}

impl UserAgent {
    /// Parse with the default configuration. Never fails.
    pub fn parse(raw: &str) -> Self {
        Parser::new().parse(raw)
    }

    /// Parse bytes that must be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`UserAgentError::InvalidUtf8`](crate::UserAgentError::InvalidUtf8)
    /// if `raw` is not valid UTF-8. Use [`Parser::classify`] to classify
    /// arbitrary bytes.
    pub fn try_from_bytes(raw: &[u8]) -> Result<Self> {
        Ok(Self::parse(std::str::from_utf8(raw)?))
    }

    /// The original input, unmodified.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Full classification.
    pub fn classification(&self) -> Classification {
        self.info
    }

    /// Resolved browser family.
    pub fn family(&self) -> BrowserFamily {
        self.info.family
    }

    /// Browser family name, `"Other"` when unresolved.
    pub fn family_name(&self) -> &'static str {
        self.info.family.as_str()
    }

    /// Browser version.
    pub fn version(&self) -> Version {
        self.info.version
    }

    /// Major browser version, 0 when unknown.
    pub fn major_version(&self) -> u32 {
        self.info.version.major
    }

    /// Minor browser version, 0 when unknown.
    pub fn minor_version(&self) -> u32 {
        self.info.version.minor
    }

    /// Detected bot.
    pub fn bot(&self) -> Option<BotName> {
        self.info.bot
    }

    /// Whether a bot signature matched.
    pub fn is_bot(&self) -> bool {
        self.info.is_bot()
    }

    /// Bot name, empty when not a bot.
    pub fn bot_name(&self) -> &'static str {
        self.info.bot_name()
    }

    /// Whether a mobile marker was present.
    pub fn is_mobile(&self) -> bool {
        self.info.mobile
    }

    /// Detected platform.
    pub fn platform(&self) -> Platform {
        self.info.platform
    }

    /// Family is Chrome.
    pub fn is_chrome(&self) -> bool {
        self.info.family == BrowserFamily::Chrome
    }

    /// Family is Edge.
    pub fn is_edge(&self) -> bool {
        self.info.family == BrowserFamily::Edge
    }

    /// Family is Firefox.
    pub fn is_firefox(&self) -> bool {
        self.info.family == BrowserFamily::Firefox
    }

    /// Family is Opera.
    pub fn is_opera(&self) -> bool {
        self.info.family == BrowserFamily::Opera
    }

    /// Family is desktop or mobile Safari.
    pub fn is_safari(&self) -> bool {
        self.info.family.is_safari()
    }

    /// Render as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse with the default configuration.
pub fn parse(raw: &str) -> UserAgent {
    UserAgent::parse(raw)
}

/// Parse many user agents in parallel with the default configuration.
pub fn parse_batch<S>(inputs: &[S]) -> Vec<UserAgent>
where
    S: AsRef<str> + Sync,
{
    Parser::new().parse_batch(inputs)
}
