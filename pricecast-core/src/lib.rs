//! PriceCast Core: synthetic price history, forecast bands, chart alignment.
//!
//! This crate contains the whole engine behind the `pricecast` CLI:
//! - Symbol catalog with lookup, search and TOML persistence
//! - Seasonal random-walk history and confidence-banded forecast synthesis
//! - Snapshot assembly with lenient or strict symbol resolution
//! - Chart alignment of history and forecast on one axis
//! - Indicators (computed or placeholder) and their signal interpretation
//! - Prediction summaries and the static model registry
//!
//! All randomness flows through [`rng::RandomSource`], so every operation is
//! reproducible under a fixed or seeded source.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod models;
pub mod rng;
pub mod snapshot;
pub mod summary;
pub mod synth;

pub use catalog::{CatalogEntry, SymbolCatalog, SymbolListing};
pub use chart::{AlignedChartSeries, ChartAligner, ChartRow};
pub use config::{ChartWindows, ConfigError, EngineConfig, IndicatorMode, SymbolPolicy};
pub use domain::{ForecastModel, ForecastPoint, HistoricalPoint, Snapshot, SymbolResolution};
pub use error::{EngineError, Result};
pub use models::ModelRegistry;
pub use rng::{FixedSource, RandomSource, RngSource, SeedHierarchy};
pub use snapshot::SnapshotBuilder;
pub use summary::PredictionSummary;
