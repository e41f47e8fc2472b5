// =============================================================================
// Central Application State — StockSense Backend
// =============================================================================
//
// One Arc-shared struct ties the subsystems together: configuration, the
// in-memory user/session stores, and the three provider clients. The
// stores use interior locking, so handlers only ever need `&self`.

use std::time::Instant;

use crate::config::Config;
use crate::llm::ChatClient;
use crate::market::MarketClient;
use crate::news::NewsClient;
use crate::storage::{MemStorage, SessionStore};

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    pub config: Config,
    pub storage: MemStorage,
    pub sessions: SessionStore,
    pub market: MarketClient,
    pub news: NewsClient,
    pub chat: ChatClient,
    /// Instant the server was started. Used for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    /// Construct the full state from the given configuration.
    ///
    /// The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: Config) -> Self {
        let news = NewsClient::new(config.news_api_key.clone());
        let chat = ChatClient::new(config.openai_api_key.clone(), config.openai_model.clone());

        Self {
            storage: MemStorage::new(),
            sessions: SessionStore::new(),
            market: MarketClient::new(),
            news,
            chat,
            start_time: Instant::now(),
            config,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
