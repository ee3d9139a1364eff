//! Crawler and automated-client detection.
//!
//! Runs independently of family classification: a bot that impersonates
//! Mobile Safari still resolves to `MobileSafari` as its family, and is
//! additionally reported as a bot.

use crate::scanner::ScanResult;
use crate::signatures::{best_match, BOT_SIGNATURES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotName {
    /// Baidu spider
    Baidu,
    /// Microsoft Bing
    Bingbot,
    /// DuckDuckGo
    DuckDuckBot,
    /// Go's `net/http` default client
    Go,
    /// Google
    Googlebot,
    /// Yandex
    YandexBot,
    /// Apple
    Applebot,
    /// Yahoo
    #[serde(rename = "Yahoo! Slurp")]
    YahooSlurp,
    /// Facebook link previews
    #[serde(rename = "facebookexternalhit")]
    FacebookExternalHit,
    /// Twitter link previews
    Twitterbot,
}

impl BotName {
    /// Display name of the bot.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BotName::Baidu => "Baidu",
            BotName::Bingbot => "Bingbot",
            BotName::DuckDuckBot => "DuckDuckBot",
            BotName::Go => "Go",
            BotName::Googlebot => "Googlebot",
            BotName::YandexBot => "YandexBot",
            BotName::Applebot => "Applebot",
            BotName::YahooSlurp => "Yahoo! Slurp",
            BotName::FacebookExternalHit => "facebookexternalhit",
            BotName::Twitterbot => "Twitterbot",
        }
    }
}

impl fmt::Display for BotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect a bot from scanned markers, `None` when no bot signature matches.
pub fn detect_bot(scan: &ScanResult) -> Option<BotName> {
    let signature = best_match(BOT_SIGNATURES, scan)?;
    trace_log!("bot {:?} matched at rank {}", signature.target, signature.rank);
    Some(signature.target)
}
