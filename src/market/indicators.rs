//! Technical indicators over a price history (spec §4.5). Hand-rolled rather than
//! delegated to a crate: the exact "default 50 / 0 when history <= period" contract
//! doesn't match what off-the-shelf indicator crates do at the edges.

/// Wilder-smoothed RSI. `50.0` when `prices.len() <= period` (spec §8 "RSI default").
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if prices.len() <= period || period == 0 {
        return 50.0;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss += -change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    for i in (period + 1)..prices.len() {
        let change = prices[i] - prices[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
    }

    let rs = if avg_loss == 0.0 {
        f64::MAX
    } else {
        avg_gain / avg_loss
    };
    100.0 - 100.0 / (1.0 + rs)
}

/// Simple moving average of the last `period` prices. Last price if history is
/// shorter than `period`; `0.0` on empty history.
pub fn sma(prices: &[f64], period: usize) -> f64 {
    if prices.len() < period {
        return prices.last().copied().unwrap_or(0.0);
    }
    let start = prices.len() - period;
    prices[start..].iter().sum::<f64>() / period as f64
}

/// Wilder-smoothed average true range over absolute first differences. `0.0` when
/// `prices.len() <= period`.
pub fn atr(prices: &[f64], period: usize) -> f64 {
    if prices.len() <= period || period == 0 {
        return 0.0;
    }

    let mut atr = 0.0;
    for i in 1..=period {
        atr += (prices[i] - prices[i - 1]).abs();
    }
    atr /= period as f64;

    for i in (period + 1)..prices.len() {
        let tr = (prices[i] - prices[i - 1]).abs();
        atr = (atr * (period - 1) as f64 + tr) / period as f64;
    }
    atr
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rsi_defaults_to_50_when_history_short() {
        assert_relative_eq!(rsi(&[100.0, 101.0], 14), 50.0);
    }

    #[test]
    fn atr_defaults_to_0_when_history_short() {
        assert_relative_eq!(atr(&[100.0, 101.0], 14), 0.0);
    }

    #[test]
    fn sma_uses_last_price_when_history_shorter_than_period() {
        assert_relative_eq!(sma(&[100.0, 102.0], 14), 102.0);
    }

    #[test]
    fn sma_returns_zero_on_empty_history() {
        assert_relative_eq!(sma(&[], 14), 0.0);
    }

    #[test]
    fn rsi_saturates_to_100_on_only_gains() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(rsi(&prices, 14), 100.0);
    }
}
