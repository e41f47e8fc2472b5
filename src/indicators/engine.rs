// =============================================================================
// Indicator Engine
// =============================================================================
//
// Composes the individual indicator functions into the full set computed for
// one stock lookup. Deterministic, stateless, no I/O: the same pair of input
// series always produces the same set.

use serde::{Deserialize, Serialize};

use super::{relative_strength, roc, sma, volatility};

/// Short SMA window; also the minimum series length for any computation.
const SMA_SHORT_PERIOD: usize = 50;
/// Long SMA window.
const SMA_LONG_PERIOD: usize = 200;
/// Trailing window for realized volatility.
const VOLATILITY_WINDOW: usize = 30;
/// Look-back for rate-of-change momentum.
const ROC_PERIOD: usize = 14;
/// Trailing window for the relative-strength stock return.
const STRENGTH_WINDOW: usize = 30;

/// The computed indicator values for one lookup.
///
/// Each field is independently nullable: `None` means the input series was
/// too short for that computation, never that the request failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalIndicators {
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub volatility: Option<f64>,
    pub roc: Option<f64>,
    pub relative_strength: Option<f64>,
}

/// Compute the full indicator set from a daily closing-price series and a
/// benchmark series, both chronological ascending.
///
/// Series shorter than 50 closes produce an all-null set; the short SMA
/// window gates every other indicator. Past that gate each indicator
/// applies its own window requirement independently, so a short benchmark
/// nulls `relative_strength` without touching the rest. Every non-null
/// value is rounded to two decimals exactly once, after the computation.
pub fn compute_indicators(closes: &[f64], benchmark_closes: &[f64]) -> TechnicalIndicators {
    let mut set = TechnicalIndicators::default();

    if closes.len() < SMA_SHORT_PERIOD {
        return set;
    }

    set.sma50 = sma::trailing_sma(closes, SMA_SHORT_PERIOD).map(round2);
    set.sma200 = sma::trailing_sma(closes, SMA_LONG_PERIOD).map(round2);
    set.volatility = volatility::realized_volatility(closes, VOLATILITY_WINDOW).map(round2);
    set.roc = roc::rate_of_change(closes, ROC_PERIOD).map(round2);
    set.relative_strength =
        relative_strength::relative_strength(closes, benchmark_closes, STRENGTH_WINDOW)
            .map(round2);
    set
}

/// Round half away from zero at the second decimal.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
