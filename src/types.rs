// =============================================================================
// Shared types used across the StockSense backend
// =============================================================================
//
// Wire types for the dashboard API. Field names serialize in camelCase to
// match what the web client consumes.

use serde::{Deserialize, Serialize};

use crate::indicators::TechnicalIndicators;

/// Percent change snapshot for one market index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub name: String,
    pub symbol: String,
    pub change: Option<f64>,
}

/// Headline sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A classified news article ready for the dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub source: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub published: Option<String>,
    pub sentiment: Sentiment,
    pub sentiment_color: String,
    pub category: String,
}

/// One daily observation of a price series, chronological ascending within
/// its containing vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// A quote metric that the provider may omit; serialized as the number or
/// the literal string "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteMetric {
    Number(f64),
    Text(String),
}

impl QuoteMetric {
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Number(v),
            None => Self::Text("N/A".to_string()),
        }
    }
}

/// Header fields of a stock lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBasicInfo {
    pub current_price: QuoteMetric,
    pub market_cap: QuoteMetric,
    pub pe_ratio: QuoteMetric,
    pub name: String,
    pub symbol: String,
}

/// Full payload of a stock lookup: quote header, computed indicators, and
/// the filtered daily history the chart renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockData {
    pub basic_info: StockBasicInfo,
    pub indicators: TechnicalIndicators,
    pub price_history: Vec<PricePoint>,
}

/// Request body for the PDF report endpoint. All fields are required; the
/// handler rejects the request when any is empty or absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfReportRequest {
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub ai_analysis: String,
    #[serde(default)]
    pub indicators: Option<TechnicalIndicators>,
}
