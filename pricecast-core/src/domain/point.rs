//! Series points: one historical day, one forecast day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily OHLCV point of a synthesized history.
///
/// `close` always equals `price`. `high`, `low` and `open` are drawn
/// independently of the close, so on rare draws `open` can sit outside
/// `[low, high]`; see [`HistoricalPoint::brackets_close`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
}

impl HistoricalPoint {
    /// True when `low <= min(open, close)` and `max(open, close) <= high`.
    pub fn brackets_close(&self) -> bool {
        self.low <= self.open.min(self.close) && self.open.max(self.close) <= self.high
    }
}

/// Label of the model a forecast point is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastModel {
    #[serde(rename = "LSTM")]
    Lstm,
    #[serde(rename = "ARIMA")]
    Arima,
    #[serde(rename = "Random Forest")]
    RandomForest,
    #[serde(rename = "XGBoost")]
    XgBoost,
}

impl ForecastModel {
    /// Fixed labeling order; point `i` gets `ROTATION[i % 4]`.
    pub const ROTATION: [ForecastModel; 4] = [
        ForecastModel::Lstm,
        ForecastModel::Arima,
        ForecastModel::RandomForest,
        ForecastModel::XgBoost,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ROTATION[index % Self::ROTATION.len()]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ForecastModel::Lstm => "LSTM",
            ForecastModel::Arima => "ARIMA",
            ForecastModel::RandomForest => "Random Forest",
            ForecastModel::XgBoost => "XGBoost",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One forward-looking prediction with its confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_price: f64,
    pub confidence: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
    pub model: ForecastModel,
}

impl ForecastPoint {
    pub fn band_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// True when the price lies inside `[lower_bound, upper_bound]`.
    pub fn band_contains(&self, price: f64) -> bool {
        self.lower_bound <= price && price <= self.upper_bound
    }
}
