//! Latest-value indicator readings attached to a snapshot.

use serde::{Deserialize, Serialize};

use super::{Bollinger, Ema, Indicator, Macd, MacdLine, Rsi, Sma};
use crate::domain::{round1, round2};
use crate::error::{EngineError, Result};
use crate::rng::RandomSource;

/// Closes needed before every computed reading is valid (SMA 50).
pub const MIN_COMPUTED_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSurface {
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub bollinger_upper: f64,
    pub bollinger_lower: f64,
    pub bollinger_middle: f64,
}

impl IndicatorSurface {
    /// Fixed offsets of the current price plus random oscillator readings.
    ///
    /// These values are unrelated to any price history. Draw order: rsi,
    /// macd, macd_signal.
    pub fn placeholder(current_price: f64, rng: &mut dyn RandomSource) -> Self {
        let rsi = round1(rng.next_unit() * 40.0 + 30.0);
        let macd = round2(rng.next_unit() * 4.0 - 2.0);
        let macd_signal = round2(rng.next_unit() * 4.0 - 2.0);
        Self {
            sma20: round2(current_price * 0.98),
            sma50: round2(current_price * 0.95),
            ema12: round2(current_price * 1.01),
            ema26: round2(current_price * 0.99),
            rsi,
            macd,
            macd_signal,
            bollinger_upper: round2(current_price * 1.05),
            bollinger_lower: round2(current_price * 0.95),
            bollinger_middle: round2(current_price),
        }
    }

    /// Latest readings computed from a close series (oldest first).
    pub fn from_closes(closes: &[f64]) -> Result<Self> {
        if closes.len() < MIN_COMPUTED_HISTORY {
            return Err(EngineError::InsufficientData {
                needed: MIN_COMPUTED_HISTORY,
                available: closes.len(),
            });
        }

        Ok(Self {
            sma20: round2(latest(&Sma::new(20), closes)?),
            sma50: round2(latest(&Sma::new(50), closes)?),
            ema12: round2(latest(&Ema::new(12), closes)?),
            ema26: round2(latest(&Ema::new(26), closes)?),
            rsi: round1(latest(&Rsi::new(14), closes)?),
            macd: round2(latest(&Macd::standard(MacdLine::Line), closes)?),
            macd_signal: round2(latest(&Macd::standard(MacdLine::Signal), closes)?),
            bollinger_upper: round2(latest(&Bollinger::upper(20, 2.0), closes)?),
            bollinger_lower: round2(latest(&Bollinger::lower(20, 2.0), closes)?),
            bollinger_middle: round2(latest(&Bollinger::middle(20, 2.0), closes)?),
        })
    }
}

fn latest(indicator: &dyn Indicator, closes: &[f64]) -> Result<f64> {
    indicator.latest(closes).ok_or_else(|| {
        EngineError::InvalidParameter(format!(
            "{} has no valid reading; history contains non-finite closes",
            indicator.name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSource;

    #[test]
    fn placeholder_with_neutral_draws() {
        let s = IndicatorSurface::placeholder(100.0, &mut FixedSource(0.5));
        assert_eq!(s.sma20, 98.0);
        assert_eq!(s.sma50, 95.0);
        assert_eq!(s.ema12, 101.0);
        assert_eq!(s.ema26, 99.0);
        assert_eq!(s.rsi, 50.0);
        assert_eq!(s.macd, 0.0);
        assert_eq!(s.macd_signal, 0.0);
        assert_eq!(s.bollinger_upper, 105.0);
        assert_eq!(s.bollinger_lower, 95.0);
        assert_eq!(s.bollinger_middle, 100.0);
    }

    #[test]
    fn placeholder_rsi_in_range() {
        for u in [0.0, 0.25, 0.999] {
            let s = IndicatorSurface::placeholder(50.0, &mut FixedSource(u));
            assert!((30.0..=70.0).contains(&s.rsi));
            assert!((-2.0..=2.0).contains(&s.macd));
        }
    }

    #[test]
    fn computed_from_flat_history() {
        let closes = vec![42.0; 60];
        let s = IndicatorSurface::from_closes(&closes).unwrap();
        assert_eq!(s.sma20, 42.0);
        assert_eq!(s.sma50, 42.0);
        assert_eq!(s.ema26, 42.0);
        assert_eq!(s.rsi, 50.0);
        assert_eq!(s.macd, 0.0);
        assert_eq!(s.bollinger_upper, 42.0);
        assert_eq!(s.bollinger_lower, 42.0);
    }

    #[test]
    fn computed_from_uptrend() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + i as f64 * 0.5).collect();
        let s = IndicatorSurface::from_closes(&closes).unwrap();
        assert!(s.sma20 > s.sma50);
        assert!(s.ema12 > s.ema26);
        assert_eq!(s.rsi, 100.0);
        assert!(s.macd > 0.0);
        assert!(s.bollinger_upper > s.bollinger_middle);
        assert!(s.bollinger_middle > s.bollinger_lower);
    }

    #[test]
    fn short_history_rejected() {
        let err = IndicatorSurface::from_closes(&[1.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientData {
                needed: 50,
                available: 10
            }
        ));
    }
}
