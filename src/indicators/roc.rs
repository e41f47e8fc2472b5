// =============================================================================
// Rate of Change (ROC) — Momentum Indicator
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC = ((close - close_n) / close_n) * 100
//
// Positive ROC indicates upward momentum; negative indicates downward.

/// Percentage change between the latest close and the close `period`
/// trading days earlier.
///
/// Returns `None` when the series does not reach back `period` days or the
/// reference close is zero.
pub fn rate_of_change(closes: &[f64], period: usize) -> Option<f64> {
    let n = closes.len();
    if period == 0 || n <= period {
        return None;
    }

    let reference = closes[n - 1 - period];
    if reference == 0.0 {
        return None;
    }
    Some(((closes[n - 1] - reference) / reference) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roc_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        // Latest close 20, reference 14 days back is 6: (20-6)/6 * 100.
        let roc = rate_of_change(&closes, 14).unwrap();
        assert!((roc - 1400.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn roc_exact_window_is_none() {
        // 14 closes have no close 14 days before the last one.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(rate_of_change(&closes, 14).is_none());
    }

    #[test]
    fn roc_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(rate_of_change(&closes, 14).is_none());
    }

    #[test]
    fn roc_zero_reference_close() {
        let mut closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let n = closes.len();
        closes[n - 15] = 0.0;
        assert!(rate_of_change(&closes, 14).is_none());
    }
}
