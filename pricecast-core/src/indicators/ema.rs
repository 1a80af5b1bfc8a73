//! Exponential moving average, seeded with the SMA of the first `period`
//! values and smoothed with `alpha = 2 / (period + 1)` afterwards.

use super::{aligned, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub const fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Ema {
    fn name(&self) -> String {
        format!("ema_{}", self.period)
    }

    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn series(&self, closes: &[f64]) -> Vec<f64> {
        ema_of_series(closes, self.period)
    }
}

/// EMA of any series. A `NaN` anywhere from the seed window onwards ends
/// the valid run: every later slot stays `NaN`.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return vec![f64::NAN; values.len()];
    }

    let (seed_window, rest) = values.split_at(period);
    let seed = seed_window.iter().sum::<f64>() / period as f64;
    let alpha = 2.0 / (period as f64 + 1.0);

    let smoothed = std::iter::once(seed).chain(rest.iter().scan(seed, move |prev, &v| {
        *prev = alpha * v + (1.0 - alpha) * *prev;
        Some(*prev)
    }));
    aligned(values.len(), period - 1, smoothed)
}

/// EMA of a series that opens with its own `NaN` warmup (e.g. MACD line).
pub(crate) fn ema_after_warmup(values: &[f64], period: usize) -> Vec<f64> {
    let start = values
        .iter()
        .position(|v| !v.is_nan())
        .unwrap_or(values.len());
    let mut out = vec![f64::NAN; start];
    out.extend(ema_of_series(&values[start..], period));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_close;

    #[test]
    fn seeded_then_smoothed() {
        // Period 3: alpha = 0.5; seed = mean(2, 4, 6) = 4.
        let out = Ema::new(3).series(&[2.0, 4.0, 6.0, 10.0, 2.0]);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_close(out[2], 4.0);
        assert_close(out[3], 7.0);
        assert_close(out[4], 4.5);
    }

    #[test]
    fn nan_ends_the_run() {
        let seeded = Ema::new(2).series(&[1.0, f64::NAN, 3.0, 4.0]);
        assert!(seeded.iter().all(|v| v.is_nan()));

        let later = Ema::new(2).series(&[1.0, 3.0, f64::NAN, 4.0]);
        assert_close(later[1], 2.0);
        assert!(later[2].is_nan() && later[3].is_nan());
    }

    #[test]
    fn flat_series_is_flat() {
        let out = Ema::new(26).series(&[42.0; 40]);
        assert_close(out[39], 42.0);
        assert_eq!(Ema::new(26).warmup(), 25);
    }

    #[test]
    fn leading_warmup_is_skipped() {
        let values = [f64::NAN, 2.0, 4.0, 6.0];
        let out = ema_after_warmup(&values, 2);
        assert_eq!(out.len(), 4);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_close(out[2], 3.0);
        // alpha = 2/3: 2/3 * 6 + 1/3 * 3
        assert_close(out[3], 5.0);
    }
}
