//! Seasonal random walk producing daily OHLCV history.
//!
//! Per day `i`, with the walk starting at `base_price`:
//! - trend = sin(i / 30) * 0.001 (slow ~30-day cycle)
//! - noise = (U - 0.5) * 0.02 (±1%)
//! - price *= 1 + trend + noise
//! - high/low/open are independent draws around the new price
//!
//! Draw order per day: noise, high, low, open, volume.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::domain::{round2, HistoricalPoint};
use crate::error::{ensure_nonzero, ensure_positive_price, EngineError, Result};
use crate::rng::RandomSource;

pub const DEFAULT_HISTORY_DAYS: usize = 365;

const TREND_PERIOD: f64 = 30.0;
const TREND_AMPLITUDE: f64 = 0.001;
const DAILY_VOLATILITY: f64 = 0.02;
const RANGE_SPREAD: f64 = 0.02;
const OPEN_SPREAD: f64 = 0.01;
const VOLUME_SPAN: f64 = 9_000_000.0;
const VOLUME_FLOOR: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySynthesizer {
    horizon_days: usize,
}

impl HistorySynthesizer {
    pub fn new(horizon_days: usize) -> Result<Self> {
        ensure_nonzero("horizon_days", horizon_days)?;
        Ok(Self { horizon_days })
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Generate `horizon_days` points on consecutive days. The first point is
    /// dated `horizon_days` days before `as_of`; the last is the day before.
    pub fn synthesize(
        &self,
        base_price: f64,
        as_of: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<HistoricalPoint>> {
        ensure_positive_price("base_price", base_price)?;
        let start = as_of
            .checked_sub_days(Days::new(self.horizon_days as u64))
            .ok_or_else(|| {
                EngineError::InvalidParameter(format!(
                    "history of {} days before {as_of} is out of calendar range",
                    self.horizon_days
                ))
            })?;

        let mut points = Vec::with_capacity(self.horizon_days);
        let mut current_price = base_price;
        let mut date = start;

        for i in 0..self.horizon_days {
            let trend = (i as f64 / TREND_PERIOD).sin() * TREND_AMPLITUDE;
            let random_change = (rng.next_unit() - 0.5) * DAILY_VOLATILITY;
            current_price *= 1.0 + trend + random_change;

            let high = current_price * (1.0 + rng.next_unit() * RANGE_SPREAD);
            let low = current_price * (1.0 - rng.next_unit() * RANGE_SPREAD);
            let open = current_price * (1.0 + (rng.next_unit() - 0.5) * OPEN_SPREAD);
            let volume = (rng.next_unit() * VOLUME_SPAN).floor() as u64 + VOLUME_FLOOR;

            let close = round2(current_price);
            points.push(HistoricalPoint {
                date,
                price: close,
                volume,
                high: round2(high),
                low: round2(low),
                open: round2(open),
                close,
            });

            date = date.succ_opt().ok_or_else(|| {
                EngineError::InvalidParameter(format!("date overflow after {date}"))
            })?;
        }

        debug!(
            points = points.len(),
            start = %start,
            base_price,
            "synthesized history"
        );
        Ok(points)
    }
}

impl Default for HistorySynthesizer {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HISTORY_DAYS,
        }
    }
}
