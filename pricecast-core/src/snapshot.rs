//! Snapshot assembly.
//!
//! Resolves a symbol through the catalog, draws the headline metrics, runs
//! both synthesizers, and attaches an indicator surface. The builder holds
//! no per-request state; every call is independent apart from the draws it
//! takes from the caller's random source.
//!
//! Draw order: price change, history, forecast, volume, market cap, then the
//! placeholder indicator readings.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogEntry, SymbolCatalog};
use crate::config::{EngineConfig, IndicatorMode, SymbolPolicy};
use crate::domain::{round2, Snapshot, SymbolResolution};
use crate::error::{EngineError, Result};
use crate::indicators::IndicatorSurface;
use crate::rng::{RandomSource, SeedHierarchy};
use crate::synth::{ForecastSynthesizer, HistorySynthesizer};

const PRICE_CHANGE_SPAN: f64 = 10.0;
const VOLUME_SPAN: f64 = 100_000_000.0;
const VOLUME_FLOOR: u64 = 10_000_000;
const MARKET_CAP_SPAN: f64 = 1_000_000_000_000.0;
const MARKET_CAP_FLOOR: u64 = 100_000_000_000;
const DAILY_RANGE: f64 = 0.03;

#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    catalog: SymbolCatalog,
    config: EngineConfig,
    history: HistorySynthesizer,
    forecast: ForecastSynthesizer,
}

impl SnapshotBuilder {
    pub fn new(catalog: SymbolCatalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let history = HistorySynthesizer::new(config.history_days)?;
        let forecast = ForecastSynthesizer::new(config.forecast_days)?;
        Ok(Self {
            catalog,
            config,
            history,
            forecast,
        })
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Look a symbol up under the configured policy.
    pub fn resolve(&self, symbol: &str) -> Result<(&CatalogEntry, SymbolResolution)> {
        if let Some(entry) = self.catalog.resolve(symbol) {
            return Ok((entry, SymbolResolution::Found));
        }
        match self.config.symbol_policy {
            SymbolPolicy::Strict => Err(EngineError::UnknownSymbol {
                symbol: symbol.to_string(),
            }),
            SymbolPolicy::Lenient => {
                let fallback = self.catalog.first();
                warn!(
                    requested = symbol,
                    fallback = %fallback.symbol,
                    "unknown symbol, substituting first catalog entry"
                );
                Ok((fallback, SymbolResolution::Fallback))
            }
        }
    }

    /// Build one snapshot. `as_of` is "today": history ends the day before,
    /// the forecast starts the day after.
    pub fn build(
        &self,
        symbol: &str,
        as_of: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> Result<Snapshot> {
        let (entry, resolution) = self.resolve(symbol)?;
        let current_price = entry.base_price;

        let price_change = (rng.next_unit() - 0.5) * PRICE_CHANGE_SPAN;
        let price_change_percent = price_change / current_price * 100.0;

        let historical_series = self.history.synthesize(
            current_price * self.config.history_base_factor,
            as_of,
            rng,
        )?;
        let forecast_series = self.forecast.synthesize(current_price, as_of, rng)?;

        let volume = (rng.next_unit() * VOLUME_SPAN).floor() as u64 + VOLUME_FLOOR;
        let market_cap = (rng.next_unit() * MARKET_CAP_SPAN).floor() as u64 + MARKET_CAP_FLOOR;

        let indicator_surface = match self.config.indicator_mode {
            IndicatorMode::Placeholder => IndicatorSurface::placeholder(current_price, rng),
            IndicatorMode::Computed => {
                let closes: Vec<f64> = historical_series.iter().map(|p| p.close).collect();
                IndicatorSurface::from_closes(&closes)?
            }
        };

        debug!(
            symbol = %entry.symbol,
            history = historical_series.len(),
            forecast = forecast_series.len(),
            "built snapshot"
        );

        Ok(Snapshot {
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            requested_symbol: symbol.to_string(),
            resolution,
            current_price,
            price_change: round2(price_change),
            price_change_percent: round2(price_change_percent),
            volume,
            market_cap,
            daily_high: round2(current_price * (1.0 + DAILY_RANGE)),
            daily_low: round2(current_price * (1.0 - DAILY_RANGE)),
            historical_series,
            forecast_series,
            indicator_surface,
        })
    }

    /// Build a snapshot for every catalog entry, in catalog order.
    ///
    /// Each symbol draws from its own source seeded by `seeds`, so the result
    /// is identical whatever the thread count.
    pub fn build_all(&self, as_of: NaiveDate, seeds: &SeedHierarchy) -> Result<Vec<Snapshot>> {
        info!(
            symbols = self.catalog.len(),
            master_seed = seeds.master_seed(),
            "building catalog snapshots"
        );
        self.catalog
            .entries()
            .par_iter()
            .map(|entry| {
                let mut rng = seeds.source_for(&entry.symbol);
                self.build(&entry.symbol, as_of, &mut rng)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSource, RngSource};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn builder(config: EngineConfig) -> SnapshotBuilder {
        SnapshotBuilder::new(SymbolCatalog::default_us(), config).unwrap()
    }

    #[test]
    fn neutral_snapshot_headline_metrics() {
        let b = builder(EngineConfig::default());
        let s = b.build("AAPL", as_of(), &mut FixedSource(0.5)).unwrap();

        assert_eq!(s.symbol, "AAPL");
        assert_eq!(s.name, "Apple Inc.");
        assert_eq!(s.resolution, SymbolResolution::Found);
        assert_eq!(s.current_price, 175.43);
        assert_eq!(s.price_change, 0.0);
        assert_eq!(s.price_change_percent, 0.0);
        assert_eq!(s.volume, 60_000_000);
        assert_eq!(s.market_cap, 600_000_000_000);
        assert_eq!(s.daily_high, 180.69);
        assert_eq!(s.daily_low, 170.17);
        assert_eq!(s.historical_series.len(), 365);
        assert_eq!(s.forecast_series.len(), 30);
    }

    #[test]
    fn history_starts_below_current_price() {
        let b = builder(EngineConfig::default());
        let s = b.build("JPM", as_of(), &mut FixedSource(0.5)).unwrap();
        // 154.78 * 0.9; day 0 carries no trend.
        assert_eq!(s.historical_series[0].close, 139.30);
        assert_eq!(s.forecast_series[0].predicted_price, 154.78);
    }

    #[test]
    fn lenient_unknown_symbol_falls_back() {
        let b = builder(EngineConfig::default());
        let s = b.build("ZZZZ", as_of(), &mut FixedSource(0.5)).unwrap();
        assert_eq!(s.symbol, "AAPL");
        assert_eq!(s.requested_symbol, "ZZZZ");
        assert!(s.is_fallback());
    }

    #[test]
    fn strict_unknown_symbol_errors() {
        let b = builder(EngineConfig {
            symbol_policy: SymbolPolicy::Strict,
            ..EngineConfig::default()
        });
        let err = b.build("ZZZZ", as_of(), &mut FixedSource(0.5)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownSymbol { symbol } if symbol == "ZZZZ"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let b = builder(EngineConfig::default());
        let s = b.build("nvda", as_of(), &mut FixedSource(0.5)).unwrap();
        assert_eq!(s.symbol, "NVDA");
        assert_eq!(s.resolution, SymbolResolution::Found);
    }

    #[test]
    fn computed_indicators_track_history() {
        let b = builder(EngineConfig {
            indicator_mode: IndicatorMode::Computed,
            ..EngineConfig::default()
        });
        let s = b.build("TSLA", as_of(), &mut RngSource::seeded(11)).unwrap();
        let closes: Vec<f64> = s.historical_series.iter().map(|p| p.close).collect();
        let expected = IndicatorSurface::from_closes(&closes).unwrap();
        assert_eq!(s.indicator_surface, expected);
    }

    #[test]
    fn computed_indicators_need_history() {
        let b = builder(EngineConfig {
            indicator_mode: IndicatorMode::Computed,
            history_days: 20,
            chart: crate::config::ChartWindows {
                historical_window: 20,
                forecast_window: 30,
            },
            ..EngineConfig::default()
        });
        let err = b.build("AAPL", as_of(), &mut FixedSource(0.5)).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData { .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EngineConfig {
            forecast_days: 0,
            ..EngineConfig::default()
        };
        assert!(SnapshotBuilder::new(SymbolCatalog::default_us(), config).is_err());
    }

    #[test]
    fn build_all_covers_catalog_in_order() {
        let b = builder(EngineConfig::default());
        let seeds = SeedHierarchy::new(42);
        let snapshots = b.build_all(as_of(), &seeds).unwrap();
        let symbols: Vec<&str> = snapshots.iter().map(|s| s.symbol.as_str()).collect();
        let expected: Vec<&str> = b.catalog().entries().iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, expected);

        let again = b.build_all(as_of(), &seeds).unwrap();
        assert_eq!(snapshots, again);
    }

    #[test]
    fn build_all_matches_single_builds() {
        let b = builder(EngineConfig::default());
        let seeds = SeedHierarchy::new(7);
        let all = b.build_all(as_of(), &seeds).unwrap();
        let single = b
            .build("META", as_of(), &mut seeds.source_for("META"))
            .unwrap();
        let from_batch = all.iter().find(|s| s.symbol == "META").unwrap();
        assert_eq!(&single, from_batch);
    }
}
