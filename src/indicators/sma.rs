// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA(n) is the arithmetic mean of the trailing n daily closes.

/// Arithmetic mean of the last `period` closes.
///
/// Returns `None` when `period` is zero or fewer than `period` data points
/// are available.
pub fn trailing_sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_basic() {
        let closes: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        let sma = trailing_sma(&closes, 50).unwrap();
        assert!((sma - 25.5).abs() < 1e-10);
    }

    #[test]
    fn sma_uses_only_trailing_window() {
        // Earlier values must not influence the result.
        let mut closes = vec![1_000_000.0; 100];
        closes.extend((1..=200).map(|x| x as f64));
        let sma = trailing_sma(&closes, 200).unwrap();
        assert!((sma - 100.5).abs() < 1e-10);
    }

    #[test]
    fn sma_insufficient_data() {
        let closes = vec![1.0, 2.0, 3.0];
        assert!(trailing_sma(&closes, 50).is_none());
    }

    #[test]
    fn sma_zero_period() {
        assert!(trailing_sma(&[1.0, 2.0], 0).is_none());
    }
}
