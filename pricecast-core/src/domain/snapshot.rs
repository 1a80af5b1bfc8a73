//! Snapshot: everything the presentation layer needs for one symbol.

use serde::{Deserialize, Serialize};

use super::point::{ForecastPoint, HistoricalPoint};
use crate::indicators::IndicatorSurface;

/// How the requested symbol was resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolResolution {
    /// The requested symbol was in the catalog.
    Found,
    /// The requested symbol was unknown; the catalog's first entry was used.
    Fallback,
}

/// Aggregate per-symbol view: headline metrics, both series, indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub symbol: String,
    pub name: String,
    /// Symbol as the caller asked for it (differs from `symbol` on fallback).
    pub requested_symbol: String,
    pub resolution: SymbolResolution,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub volume: u64,
    pub market_cap: u64,
    pub daily_high: f64,
    pub daily_low: f64,
    pub historical_series: Vec<HistoricalPoint>,
    pub forecast_series: Vec<ForecastPoint>,
    pub indicator_surface: IndicatorSurface,
}

impl Snapshot {
    pub fn is_fallback(&self) -> bool {
        self.resolution == SymbolResolution::Fallback
    }

    /// Close of the most recent historical point.
    pub fn last_close(&self) -> Option<f64> {
        self.historical_series.last().map(|p| p.close)
    }
}
