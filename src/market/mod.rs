// =============================================================================
// Market Data Provider
// =============================================================================

pub mod client;

pub use client::{MarketClient, Quote};
