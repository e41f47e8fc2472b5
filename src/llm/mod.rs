// =============================================================================
// Chat / LLM Provider
// =============================================================================

pub mod client;

pub use client::ChatClient;

/// System persona sent with every chat completion.
pub const ANALYST_PERSONA: &str = "You are StockSense AI, an expert financial advisor \
specializing in stock market analysis, technical indicators, and investment insights. \
Provide clear, concise, and actionable advice.";
