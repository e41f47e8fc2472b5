// =============================================================================
// Configuration — environment-driven settings
// =============================================================================
//
// All settings are read once at startup, after dotenv has populated the
// process environment. Provider API keys may be absent: the server still
// starts, and the owning endpoint reports a configuration error when
// exercised.

use tracing::warn;

/// Default bind address for the HTTP API.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
/// Default chat-completions model.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
/// Default benchmark instrument for relative strength.
const DEFAULT_BENCHMARK: &str = "SPY";

/// Runtime settings for the StockSense backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API listens on.
    pub bind_addr: String,
    /// NewsAPI key; empty when unconfigured.
    pub news_api_key: String,
    /// OpenAI key; empty when unconfigured.
    pub openai_api_key: String,
    /// Chat-completions model name.
    pub openai_model: String,
    /// Benchmark symbol used for relative strength.
    pub benchmark_symbol: String,
}

impl Config {
    /// Build a `Config` from the process environment.
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env_or("STOCKSENSE_BIND_ADDR", DEFAULT_BIND_ADDR),
            news_api_key: std::env::var("NEWS_API_KEY").unwrap_or_default(),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            benchmark_symbol: env_or("STOCKSENSE_BENCHMARK", DEFAULT_BENCHMARK),
        };

        if config.news_api_key.is_empty() {
            warn!("NEWS_API_KEY is not set — /api/news will report an error");
        }
        if config.openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set — /api/chat will report an error");
        }

        config
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            news_api_key: String::new(),
            openai_api_key: String::new(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            benchmark_symbol: DEFAULT_BENCHMARK.to_string(),
        }
    }
}
