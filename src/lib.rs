//! Fast Browser - User Agent Classification
//!
//! Fast Browser turns raw HTTP `User-Agent` headers into structured data:
//! browser family, major/minor version, bot identity, mobile flag and a
//! coarse platform. It is meant for request-handling hot paths, so
//! classification is total (garbage in, `Other` out) and does not allocate.
//!
//! # Quick Start
//!
//! ```rust
//! use fast_browser::{BotName, BrowserFamily, UserAgent};
//!
//! let ua = UserAgent::parse(
//!     "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) \
//!      Chrome/41.0.2228.0 Safari/537.36",
//! );
//! assert_eq!(ua.family(), BrowserFamily::Chrome);
//! assert_eq!(ua.major_version(), 41);
//!
//! let bot = UserAgent::parse("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)");
//! assert_eq!(bot.bot(), Some(BotName::Googlebot));
//!
//! let unknown = UserAgent::parse("abc123");
//! assert_eq!(unknown.family_name(), "Other");
//! assert_eq!(unknown.source(), "abc123");
//! ```
//!
//! # Architecture
//!
//! ```text
//! raw bytes ──> scanner ──> ScanResult (fixed array, no heap)
//!                             │
//!        ┌──────────┬─────────┼──────────┬──────────┐
//!        ▼          ▼         ▼          ▼          ▼
//!     browser      bot      mobile    platform   (family)
//!        │                                          │
//!        └──────────────> version <─────────────────┘
//!                             │
//!                             ▼
//!                      Classification ──> UserAgent / C handle
//! ```
//!
//! All detection rules live in [`signatures`] as immutable `'static`
//! tables, so parsing from any number of threads needs no locking.
//!
//! # C API
//!
//! The [`c_api`] module exposes opaque handles (`parse_user_agent` /
//! `free_user_agent`), per-family predicates, and owned strings released
//! with `free_string`. See that module for the ownership rules.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Logging macro - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Logging macro - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

// Module declarations
/// Crawler detection
pub mod bot;
/// Browser family classification
pub mod browser;
/// LRU cache of classifications
pub mod cache;
/// Error types
pub mod error;
/// Mobile device detection
pub mod mobile;
/// Operating system detection
pub mod platform;
pub mod scanner;
pub mod signatures;
/// Parsed user agents and parser configuration
pub mod user_agent;
pub mod version;

// Public C API
#[allow(non_camel_case_types)]
pub mod c_api;

// Re-exports for Rust consumers
pub use crate::bot::BotName;
pub use crate::browser::BrowserFamily;
pub use crate::cache::{CacheStats, UserAgentCache};
pub use crate::error::{check_version, Result, UserAgentError};
pub use crate::platform::{Platform, PlatformName};
pub use crate::user_agent::{parse, parse_batch, Classification, Parser, ParserBuilder, UserAgent};
pub use crate::version::Version;

// Version information
/// Library version string
///
/// Bindings compare this against their own declared version at load time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
