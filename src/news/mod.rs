// =============================================================================
// News Provider
// =============================================================================

pub mod classify;
pub mod client;

pub use classify::{classify_headline, Classification};
pub use client::NewsClient;
