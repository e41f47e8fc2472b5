// =============================================================================
// Headline Classification
// =============================================================================
//
// Keyword scan over the lowercased headline. Bearish words win over bullish
// ones when both appear; the first matching category wins.

use crate::types::Sentiment;

const BEARISH_WORDS: [&str; 10] = [
    "falls", "drop", "plunge", "down", "loss", "selloff", "cuts", "fears", "crash", "decline",
];

const BULLISH_WORDS: [&str; 10] = [
    "jumps", "rises", "up", "soars", "beats", "growth", "record", "rally", "surge", "gain",
];

const BULLISH_COLOR: &str = "#10B981";
const BEARISH_COLOR: &str = "#EF4444";
const NEUTRAL_COLOR: &str = "#9CA3AF";

/// Sentiment, display color, and category derived from a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub color: &'static str,
    pub category: &'static str,
}

pub fn classify_headline(title: &str) -> Classification {
    let lower = title.to_lowercase();

    let (sentiment, color) = if BEARISH_WORDS.iter().any(|w| lower.contains(w)) {
        (Sentiment::Bearish, BEARISH_COLOR)
    } else if BULLISH_WORDS.iter().any(|w| lower.contains(w)) {
        (Sentiment::Bullish, BULLISH_COLOR)
    } else {
        (Sentiment::Neutral, NEUTRAL_COLOR)
    };

    let category = if lower.contains("bitcoin") || lower.contains("crypto") {
        "Crypto"
    } else if lower.contains("fed") || lower.contains("inflation") {
        "Macro"
    } else if lower.contains("earnings") {
        "Earnings"
    } else if lower.contains("trump") || lower.contains("election") {
        "Politics"
    } else {
        "Markets"
    };

    Classification {
        sentiment,
        color,
        category,
    }
}
