//! Reading interpretation: turns raw indicator values into coarse signals.

use serde::{Deserialize, Serialize};

use super::IndicatorSurface;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
/// MACD/signal gaps smaller than this read as neutral.
pub const MACD_NEUTRAL_BAND: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    NearUpper,
    MidChannel,
    NearLower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Above,
    Below,
}

pub fn rsi_signal(rsi: f64) -> RsiSignal {
    if rsi > RSI_OVERBOUGHT {
        RsiSignal::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

pub fn macd_signal(macd: f64, signal: f64) -> MacdSignal {
    let diff = macd - signal;
    if diff.abs() < MACD_NEUTRAL_BAND {
        MacdSignal::Neutral
    } else if diff > 0.0 {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    }
}

/// Position of `price` inside `[lower, upper]` as a percentage.
/// `None` for a zero-width (or inverted) band.
pub fn band_percent(price: f64, upper: f64, lower: f64) -> Option<f64> {
    let width = upper - lower;
    (width > 0.0).then(|| (price - lower) / width * 100.0)
}

pub fn bollinger_position(price: f64, upper: f64, lower: f64) -> BandPosition {
    match band_percent(price, upper, lower) {
        Some(p) if p > 80.0 => BandPosition::NearUpper,
        Some(p) if p < 20.0 => BandPosition::NearLower,
        _ => BandPosition::MidChannel,
    }
}

pub fn trend_signal(price: f64, average: f64) -> TrendSignal {
    if price > average {
        TrendSignal::Above
    } else {
        TrendSignal::Below
    }
}

/// Every signal derived from one surface at one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub rsi: RsiSignal,
    pub macd: MacdSignal,
    pub bollinger: BandPosition,
    pub sma20: TrendSignal,
    pub sma50: TrendSignal,
    pub ema12: TrendSignal,
    pub ema26: TrendSignal,
}

impl SignalReport {
    pub fn new(surface: &IndicatorSurface, price: f64) -> Self {
        Self {
            rsi: rsi_signal(surface.rsi),
            macd: macd_signal(surface.macd, surface.macd_signal),
            bollinger: bollinger_position(price, surface.bollinger_upper, surface.bollinger_lower),
            sma20: trend_signal(price, surface.sma20),
            sma50: trend_signal(price, surface.sma50),
            ema12: trend_signal(price, surface.ema12),
            ema26: trend_signal(price, surface.ema26),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSource;

    #[test]
    fn rsi_thresholds_are_exclusive() {
        assert_eq!(rsi_signal(70.0), RsiSignal::Neutral);
        assert_eq!(rsi_signal(70.1), RsiSignal::Overbought);
        assert_eq!(rsi_signal(30.0), RsiSignal::Neutral);
        assert_eq!(rsi_signal(29.9), RsiSignal::Oversold);
    }

    #[test]
    fn macd_neutral_band() {
        assert_eq!(macd_signal(0.55, 0.5), MacdSignal::Neutral);
        assert_eq!(macd_signal(1.0, 0.5), MacdSignal::Bullish);
        assert_eq!(macd_signal(-1.0, 0.5), MacdSignal::Bearish);
    }

    #[test]
    fn band_position() {
        assert_eq!(bollinger_position(104.5, 105.0, 95.0), BandPosition::NearUpper);
        assert_eq!(bollinger_position(100.0, 105.0, 95.0), BandPosition::MidChannel);
        assert_eq!(bollinger_position(95.5, 105.0, 95.0), BandPosition::NearLower);
    }

    #[test]
    fn zero_width_band_is_mid_channel() {
        assert_eq!(band_percent(42.0, 42.0, 42.0), None);
        assert_eq!(bollinger_position(42.0, 42.0, 42.0), BandPosition::MidChannel);
    }

    #[test]
    fn placeholder_surface_report() {
        let surface = IndicatorSurface::placeholder(100.0, &mut FixedSource(0.5));
        let report = SignalReport::new(&surface, 100.0);
        assert_eq!(report.rsi, RsiSignal::Neutral);
        assert_eq!(report.macd, MacdSignal::Neutral);
        assert_eq!(report.bollinger, BandPosition::MidChannel);
        assert_eq!(report.sma20, TrendSignal::Above);
        assert_eq!(report.ema12, TrendSignal::Below);
    }
}
