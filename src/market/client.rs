// =============================================================================
// Yahoo Finance REST API Client — quotes and daily history
// =============================================================================
//
// Consumes the public v7 quote endpoint and the v8 chart endpoint. Neither
// requires credentials, but Yahoo rejects requests that carry no
// browser-like User-Agent header.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::types::PricePoint;

/// Quote fields consumed by the stock and market-sentiment endpoints.
/// Every field is optional: Yahoo omits metrics it has no data for.
#[derive(Debug, Clone, Default)]
pub struct Quote {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub name: Option<String>,
    pub change_percent: Option<f64>,
}

/// Yahoo Finance REST client.
#[derive(Debug, Clone)]
pub struct MarketClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for MarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketClient {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (compatible; StockSense/1.0)"),
        );

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // Quotes
    // -------------------------------------------------------------------------

    /// GET /v7/finance/quote — current quote fields for one symbol.
    #[instrument(skip(self), name = "market::get_quote")]
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v7/finance/quote request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse quote response")?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET /v7/finance/quote returned {}: {}", status, body);
        }

        let result = body["quoteResponse"]["result"]
            .as_array()
            .and_then(|arr| arr.first())
            .context("symbol not found in quote response")?;

        let quote = Quote {
            price: result["regularMarketPrice"].as_f64(),
            market_cap: result["marketCap"].as_f64(),
            pe_ratio: result["trailingPE"].as_f64(),
            name: result["shortName"]
                .as_str()
                .or_else(|| result["longName"].as_str())
                .map(str::to_string),
            change_percent: result["regularMarketChangePercent"].as_f64(),
        };

        debug!(symbol, price = ?quote.price, "quote fetched");
        Ok(quote)
    }

    // -------------------------------------------------------------------------
    // Daily history
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart — daily candles from `from` until now,
    /// chronological ascending.
    ///
    /// Missing closes are reported as `0.0` so the caller can filter them
    /// together with any other non-positive observations.
    #[instrument(skip(self, from), name = "market::get_daily_history")]
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            symbol,
            from.timestamp(),
            Utc::now().timestamp()
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET /v8/finance/chart returned {}: {}", status, body);
        }

        let result = body["chart"]["result"]
            .as_array()
            .and_then(|arr| arr.first())
            .context("symbol not found in chart response")?;

        let timestamps = result["timestamp"].as_array().cloned().unwrap_or_default();
        let quote = &result["indicators"]["quote"][0];

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let Some(ts) = ts.as_i64() else {
                warn!(symbol, index = i, "skipping candle with malformed timestamp");
                continue;
            };
            let date = DateTime::from_timestamp(ts, 0)
                .unwrap_or_else(Utc::now)
                .to_rfc3339_opts(SecondsFormat::Millis, true);

            points.push(PricePoint {
                date,
                close: quote["close"][i].as_f64().unwrap_or(0.0),
                open: quote["open"][i].as_f64(),
                high: quote["high"][i].as_f64(),
                low: quote["low"][i].as_f64(),
                volume: quote["volume"][i].as_u64(),
            });
        }

        debug!(symbol, count = points.len(), "daily history fetched");
        Ok(points)
    }
}
