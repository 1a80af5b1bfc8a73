//! Technical indicators over close-price series.
//!
//! Every indicator maps a close series (oldest first) to a series of the
//! same length. The first `warmup()` slots are `f64::NAN`, and a `NaN`
//! close taints every output whose window reaches it. A zero period yields
//! an all-`NaN` series rather than a panic.
//!
//! [`IndicatorSurface`] reduces the series to the latest reading of each
//! indicator for the snapshot, and [`signals`] interprets those readings.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod signals;
pub mod sma;
pub mod surface;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use sma::Sma;
pub use surface::IndicatorSurface;

/// Close history in, aligned numeric series out.
///
/// No output at index t may depend on a close after t.
pub trait Indicator: Send + Sync {
    /// Short identifier such as `sma_20` or `macd_signal_12_26_9`.
    fn name(&self) -> String;

    /// Leading slots that stay `NaN` on clean input.
    fn warmup(&self) -> usize;

    fn series(&self, closes: &[f64]) -> Vec<f64>;

    /// Reading at the newest close, if it is past warmup and finite.
    fn latest(&self, closes: &[f64]) -> Option<f64> {
        self.series(closes).last().copied().filter(|v| v.is_finite())
    }
}

/// `warmup` NaNs followed by `values`, truncated or padded to `len`.
fn aligned(len: usize, warmup: usize, values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out = Vec::with_capacity(len);
    out.extend(std::iter::repeat(f64::NAN).take(warmup.min(len)));
    out.extend(values.into_iter().take(len - out.len()));
    out.resize(len, f64::NAN);
    out
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_pads_and_truncates() {
        let out = aligned(4, 2, [1.0, 2.0, 3.0]);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[1.0, 2.0]);

        let short = aligned(3, 5, [9.0]);
        assert_eq!(short.len(), 3);
        assert!(short.iter().all(|v| v.is_nan()));
    }
}
