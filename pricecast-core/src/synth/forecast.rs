//! Forward forecast with decaying confidence.
//!
//! Per day `i` of an `h`-day horizon:
//! - change = sin(i / 10) * 0.02 + (U - 0.5) * 0.05
//! - predicted = current * (1 + change * (i + 1) / h)
//! - confidence = max(0.6, 0.95 - 0.01 * i)
//! - bounds = predicted ± predicted * (1 - confidence) / 2
//!
//! The perturbation's weight grows linearly across the horizon, so early
//! points hug the current price.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::domain::{round2, round3, ForecastModel, ForecastPoint};
use crate::error::{ensure_nonzero, ensure_positive_price, EngineError, Result};
use crate::rng::RandomSource;

pub const DEFAULT_FORECAST_DAYS: usize = 30;

pub const MAX_CONFIDENCE: f64 = 0.95;
pub const MIN_CONFIDENCE: f64 = 0.6;
const CONFIDENCE_DECAY: f64 = 0.01;

const CYCLE_PERIOD: f64 = 10.0;
const CYCLE_AMPLITUDE: f64 = 0.02;
const NOISE_AMPLITUDE: f64 = 0.05;

/// Confidence for day `index`: 0.95 decaying one point per day, floored at 0.6.
pub fn confidence_at(index: usize) -> f64 {
    (MAX_CONFIDENCE - index as f64 * CONFIDENCE_DECAY).max(MIN_CONFIDENCE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastSynthesizer {
    horizon_days: usize,
}

impl ForecastSynthesizer {
    pub fn new(horizon_days: usize) -> Result<Self> {
        ensure_nonzero("horizon_days", horizon_days)?;
        Ok(Self { horizon_days })
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Generate `horizon_days` predictions starting the day after `as_of`.
    pub fn synthesize(
        &self,
        current_price: f64,
        as_of: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<ForecastPoint>> {
        ensure_positive_price("current_price", current_price)?;
        let horizon = self.horizon_days as f64;

        let mut points = Vec::with_capacity(self.horizon_days);
        let mut date = as_of;

        for i in 0..self.horizon_days {
            date = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                EngineError::InvalidParameter(format!("date overflow after {date}"))
            })?;

            let base_change = (i as f64 / CYCLE_PERIOD).sin() * CYCLE_AMPLITUDE
                + (rng.next_unit() - 0.5) * NOISE_AMPLITUDE;
            let predicted = current_price * (1.0 + base_change * (i + 1) as f64 / horizon);
            let confidence = confidence_at(i);
            let uncertainty = predicted * (1.0 - confidence) * 0.5;

            points.push(ForecastPoint {
                date,
                predicted_price: round2(predicted),
                confidence: round3(confidence),
                upper_bound: round2(predicted + uncertainty),
                lower_bound: round2(predicted - uncertainty),
                model: ForecastModel::for_index(i),
            });
        }

        debug!(points = points.len(), current_price, "synthesized forecast");
        Ok(points)
    }
}

impl Default for ForecastSynthesizer {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSource, RngSource};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 0.011,
            "actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn neutral_draws_three_day_scenario() {
        let synth = ForecastSynthesizer::new(3).unwrap();
        let points = synth
            .synthesize(100.0, as_of(), &mut FixedSource(0.5))
            .unwrap();

        assert_eq!(points.len(), 3);

        assert_eq!(points[0].predicted_price, 100.00);
        assert_eq!(points[0].confidence, 0.95);
        assert_eq!(points[0].upper_bound, 102.50);
        assert_eq!(points[0].lower_bound, 97.50);
        assert_eq!(points[0].model, ForecastModel::Lstm);

        assert_eq!(points[1].predicted_price, 100.13);
        assert_eq!(points[1].confidence, 0.94);
        assert_near(points[1].upper_bound, 103.13);
        assert_near(points[1].lower_bound, 97.13);
        assert_eq!(points[1].model, ForecastModel::Arima);

        assert_eq!(points[2].predicted_price, 100.40);
        assert_eq!(points[2].confidence, 0.93);
        assert_near(points[2].upper_bound, 103.91);
        assert_near(points[2].lower_bound, 96.89);
        assert_eq!(points[2].model, ForecastModel::RandomForest);
    }

    #[test]
    fn dates_start_tomorrow() {
        let synth = ForecastSynthesizer::new(4).unwrap();
        let points = synth
            .synthesize(100.0, as_of(), &mut FixedSource(0.5))
            .unwrap();
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
        assert_eq!(points[3].date, NaiveDate::from_ymd_opt(2024, 6, 19).unwrap());
    }

    #[test]
    fn confidence_decays_then_floors() {
        assert_eq!(round3(confidence_at(0)), 0.95);
        assert_eq!(round3(confidence_at(10)), 0.85);
        assert_eq!(round3(confidence_at(35)), 0.6);
        assert_eq!(confidence_at(36), MIN_CONFIDENCE);
        assert_eq!(confidence_at(500), MIN_CONFIDENCE);
    }

    #[test]
    fn long_horizon_holds_band_invariant() {
        let synth = ForecastSynthesizer::new(60).unwrap();
        let points = synth
            .synthesize(875.28, as_of(), &mut RngSource::seeded(3))
            .unwrap();

        let mut prev_conf = f64::INFINITY;
        for p in &points {
            assert!(p.lower_bound <= p.predicted_price);
            assert!(p.predicted_price <= p.upper_bound);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&p.confidence));
            assert!(p.confidence <= prev_conf);
            prev_conf = p.confidence;
        }
        assert_eq!(points[59].confidence, 0.6);
    }

    #[test]
    fn models_rotate() {
        let synth = ForecastSynthesizer::new(8).unwrap();
        let points = synth
            .synthesize(10.0, as_of(), &mut FixedSource(0.5))
            .unwrap();
        let models: Vec<ForecastModel> = points.iter().map(|p| p.model).collect();
        assert_eq!(&models[..4], &ForecastModel::ROTATION);
        assert_eq!(&models[4..], &ForecastModel::ROTATION);
    }

    #[test]
    fn degenerate_inputs_rejected() {
        assert!(ForecastSynthesizer::new(0).is_err());
        let synth = ForecastSynthesizer::default();
        assert!(synth
            .synthesize(f64::NAN, as_of(), &mut FixedSource(0.5))
            .is_err());
    }
}
