// =============================================================================
// Realized Volatility
// =============================================================================
//
// Population standard deviation of the daily simple returns over a trailing
// window, expressed as a percentage. No annualization is applied.

/// Realized volatility over the last `window` closes.
///
/// The last `window` closes yield `window - 1` daily simple returns
/// `(c[i] - c[i-1]) / c[i-1]`; the result is the population standard
/// deviation of those returns scaled by 100. A zero previous close skips
/// that return rather than dividing by zero.
///
/// Returns `None` when fewer than `window` closes are available or no
/// return could be formed.
pub fn realized_volatility(closes: &[f64], window: usize) -> Option<f64> {
    if window < 2 || closes.len() < window {
        return None;
    }

    let recent = &closes[closes.len() - window..];
    let mut returns = Vec::with_capacity(window - 1);
    for i in 1..recent.len() {
        let prev = recent[i - 1];
        if prev == 0.0 {
            continue;
        }
        returns.push((recent[i] - prev) / prev);
    }

    if returns.is_empty() {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatility_flat_series_is_zero() {
        let closes = vec![100.0; 40];
        let vol = realized_volatility(&closes, 30).unwrap();
        assert!(vol.abs() < 1e-12);
    }

    #[test]
    fn volatility_constant_return_is_zero() {
        // A constant percentage move every day has zero return dispersion.
        let mut closes = vec![100.0];
        for _ in 0..39 {
            let last = *closes.last().unwrap();
            closes.push(last * 1.01);
        }
        let vol = realized_volatility(&closes, 30).unwrap();
        assert!(vol.abs() < 1e-9);
    }

    #[test]
    fn volatility_alternating_series() {
        // Closes alternating 100, 102 give returns alternating +2% and
        // roughly -1.96%; the dispersion is half the spread.
        let closes: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 102.0 })
            .collect();
        let vol = realized_volatility(&closes, 30).unwrap();
        assert!(vol > 1.5 && vol < 2.5);
    }

    #[test]
    fn volatility_insufficient_data() {
        let closes = vec![1.0; 10];
        assert!(realized_volatility(&closes, 30).is_none());
    }

    #[test]
    fn volatility_skips_zero_denominator() {
        // A zero close drops the return that would divide by it; the rest
        // of the window still produces a value.
        let mut closes = vec![100.0; 30];
        closes[10] = 0.0;
        assert!(realized_volatility(&closes, 30).is_some());
    }

    #[test]
    fn volatility_all_zero_series() {
        let closes = vec![0.0; 30];
        assert!(realized_volatility(&closes, 30).is_none());
    }
}
