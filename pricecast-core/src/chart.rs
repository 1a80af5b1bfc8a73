//! Chart alignment.
//!
//! Lays the tail of the history and the head of the forecast on one shared
//! x-axis. Gaps are `None` (`null` in JSON), never NaN, so a renderer can zip
//! `labels` with any line and skip missing points.
//!
//! With `W` historical and `H` forecast slots:
//! ```text
//! index            0 .. W-2    W-1          W .. W+H-1
//! historical_line  close       close        None
//! forecast_line    None        last close   predicted
//! bands            None        None         upper / lower
//! ```
//! The forecast line repeats the last close at `W-1` so the two lines join.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChartWindows;
use crate::domain::{ForecastPoint, HistoricalPoint, Snapshot};
use crate::error::{EngineError, Result};

pub const DEFAULT_HISTORICAL_WINDOW: usize = 90;
pub const DEFAULT_FORECAST_WINDOW: usize = 30;

/// Short axis label, e.g. `"Jan 5"`.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedChartSeries {
    pub labels: Vec<String>,
    pub historical_line: Vec<Option<f64>>,
    pub forecast_line: Vec<Option<f64>>,
    pub upper_band: Vec<Option<f64>>,
    pub lower_band: Vec<Option<f64>>,
}

/// One index of the aligned axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartRow<'a> {
    pub label: &'a str,
    pub historical: Option<f64>,
    pub forecast: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

impl AlignedChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the first forecast slot (the historical window size).
    pub fn boundary(&self) -> usize {
        self.historical_line
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.historical_line.len())
    }

    pub fn rows(&self) -> impl Iterator<Item = ChartRow<'_>> + '_ {
        (0..self.len()).map(move |i| ChartRow {
            label: &self.labels[i],
            historical: self.historical_line[i],
            forecast: self.forecast_line[i],
            upper: self.upper_band[i],
            lower: self.lower_band[i],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartAligner {
    historical_window: usize,
    forecast_window: usize,
}

impl ChartAligner {
    pub fn new(historical_window: usize, forecast_window: usize) -> Result<Self> {
        if historical_window == 0 || forecast_window == 0 {
            return Err(EngineError::InvalidParameter(format!(
                "chart windows must be positive (historical={historical_window}, forecast={forecast_window})"
            )));
        }
        Ok(Self {
            historical_window,
            forecast_window,
        })
    }

    pub fn historical_window(&self) -> usize {
        self.historical_window
    }

    pub fn forecast_window(&self) -> usize {
        self.forecast_window
    }

    pub fn align(&self, snapshot: &Snapshot) -> Result<AlignedChartSeries> {
        self.align_series(&snapshot.historical_series, &snapshot.forecast_series)
    }

    pub fn align_series(
        &self,
        history: &[HistoricalPoint],
        forecast: &[ForecastPoint],
    ) -> Result<AlignedChartSeries> {
        let w = self.historical_window;
        let h = self.forecast_window;
        if w > history.len() {
            return Err(EngineError::InvalidParameter(format!(
                "historical window {w} exceeds history of {} points",
                history.len()
            )));
        }
        if h > forecast.len() {
            return Err(EngineError::InvalidParameter(format!(
                "forecast window {h} exceeds forecast of {} points",
                forecast.len()
            )));
        }

        let tail = &history[history.len() - w..];
        let head = &forecast[..h];
        let total = w + h;

        let mut labels = Vec::with_capacity(total);
        labels.extend(tail.iter().map(|p| short_label(p.date)));
        labels.extend(head.iter().map(|p| short_label(p.date)));

        let mut historical_line: Vec<Option<f64>> = tail.iter().map(|p| Some(p.close)).collect();
        historical_line.resize(total, None);

        let mut forecast_line = vec![None; w - 1];
        forecast_line.push(tail.last().map(|p| p.close));
        forecast_line.extend(head.iter().map(|p| Some(p.predicted_price)));

        let mut upper_band = vec![None; w];
        upper_band.extend(head.iter().map(|p| Some(p.upper_bound)));
        let mut lower_band = vec![None; w];
        lower_band.extend(head.iter().map(|p| Some(p.lower_bound)));

        debug!(historical = w, forecast = h, "aligned chart series");
        Ok(AlignedChartSeries {
            labels,
            historical_line,
            forecast_line,
            upper_band,
            lower_band,
        })
    }
}

impl Default for ChartAligner {
    fn default() -> Self {
        Self {
            historical_window: DEFAULT_HISTORICAL_WINDOW,
            forecast_window: DEFAULT_FORECAST_WINDOW,
        }
    }
}

impl TryFrom<ChartWindows> for ChartAligner {
    type Error = EngineError;

    fn try_from(windows: ChartWindows) -> Result<Self> {
        Self::new(windows.historical_window, windows.forecast_window)
    }
}
