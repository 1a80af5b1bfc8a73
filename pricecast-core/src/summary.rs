//! Aggregate statistics over a forecast.

use serde::{Deserialize, Serialize};

use crate::domain::{round2, round3, ForecastModel, ForecastPoint, Snapshot};
use crate::error::{EngineError, Result};

/// Predictions averaged into the short-term outlook.
pub const SHORT_TERM_DAYS: usize = 7;
/// End (exclusive) of the long-term window.
pub const LONG_TERM_END: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            Self::High
        } else if confidence > 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelBreakdown {
    pub model: ForecastModel,
    pub points: usize,
    pub average_predicted: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    pub current_price: f64,
    pub average_predicted: f64,
    pub average_confidence: f64,
    pub change: f64,
    pub change_percent: f64,
    pub range_low: f64,
    pub range_high: f64,
    pub short_term: f64,
    pub long_term: Option<f64>,
    pub confidence_tier: ConfidenceTier,
    pub models: Vec<ModelBreakdown>,
}

impl PredictionSummary {
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        Self::new(&snapshot.forecast_series, snapshot.current_price)
    }

    pub fn new(forecast: &[ForecastPoint], current_price: f64) -> Result<Self> {
        if forecast.is_empty() {
            return Err(EngineError::InvalidParameter(
                "cannot summarize an empty forecast".into(),
            ));
        }
        if !(current_price.is_finite() && current_price > 0.0) {
            return Err(EngineError::InvalidParameter(format!(
                "current_price must be positive, got {current_price}"
            )));
        }

        let average_predicted = mean(forecast.iter().map(|p| p.predicted_price));
        let average_confidence = mean(forecast.iter().map(|p| p.confidence));
        let change = average_predicted - current_price;

        let range_low = forecast
            .iter()
            .map(|p| p.lower_bound)
            .fold(f64::INFINITY, f64::min);
        let range_high = forecast
            .iter()
            .map(|p| p.upper_bound)
            .fold(f64::NEG_INFINITY, f64::max);

        let short_end = forecast.len().min(SHORT_TERM_DAYS);
        let short_term = mean(forecast[..short_end].iter().map(|p| p.predicted_price));
        let long_term = (forecast.len() > SHORT_TERM_DAYS).then(|| {
            let end = forecast.len().min(LONG_TERM_END);
            round2(mean(
                forecast[SHORT_TERM_DAYS..end]
                    .iter()
                    .map(|p| p.predicted_price),
            ))
        });

        Ok(Self {
            current_price,
            average_predicted: round2(average_predicted),
            average_confidence: round3(average_confidence),
            change: round2(change),
            change_percent: round2(change / current_price * 100.0),
            range_low,
            range_high,
            short_term: round2(short_term),
            long_term,
            confidence_tier: ConfidenceTier::from_confidence(average_confidence),
            models: breakdown(forecast, current_price),
        })
    }
}

/// Per-model averages, in order of each model's first appearance.
fn breakdown(forecast: &[ForecastPoint], current_price: f64) -> Vec<ModelBreakdown> {
    let mut order: Vec<ForecastModel> = Vec::new();
    for p in forecast {
        if !order.contains(&p.model) {
            order.push(p.model);
        }
    }

    order
        .into_iter()
        .map(|model| {
            let prices: Vec<f64> = forecast
                .iter()
                .filter(|p| p.model == model)
                .map(|p| p.predicted_price)
                .collect();
            let average = mean(prices.iter().copied());
            let change = average - current_price;
            ModelBreakdown {
                model,
                points: prices.len(),
                average_predicted: round2(average),
                change: round2(change),
                change_percent: round2(change / current_price * 100.0),
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
