// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators computed for a
// stock lookup.  Every public function returns `Option<T>` so callers are
// forced to handle insufficient-data and numerical-edge-case scenarios.

pub mod engine;
pub mod relative_strength;
pub mod roc;
pub mod sma;
pub mod volatility;

pub use engine::{compute_indicators, round2, TechnicalIndicators};
