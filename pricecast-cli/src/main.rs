//! PriceCast CLI: snapshot, chart, summary, and catalog commands.
//!
//! Commands:
//! - `symbols`: list the catalog or search it by symbol/name fragment
//! - `snapshot`: synthesize one symbol's snapshot as JSON
//! - `batch`: snapshots for every catalog symbol from one master seed
//! - `chart`: aligned chart series as JSON, or CSV with `--csv`
//! - `summary`: forecast summary and indicator signals as JSON
//! - `models`: model performance and feature importance tables
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default), so stdout
//! stays machine-readable.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pricecast_core::indicators::signals::SignalReport;
use pricecast_core::models::{FeatureImportance, ModelPerformance};
use pricecast_core::{
    ChartAligner, EngineConfig, IndicatorMode, ModelRegistry, PredictionSummary, RandomSource,
    RngSource, SeedHierarchy, Snapshot, SnapshotBuilder, SymbolCatalog, SymbolPolicy,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pricecast",
    about = "PriceCast CLI: synthetic price history and forecast bands"
)]
struct Cli {
    /// Engine configuration (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Symbol catalog (TOML with [[symbols]] tables). Defaults to the built-in list.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog symbols, optionally filtered by a search query.
    Symbols {
        /// Case-insensitive fragment of a symbol or company name.
        #[arg(long)]
        query: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Synthesize a snapshot for one symbol.
    Snapshot {
        symbol: String,

        /// Master seed for a reproducible snapshot. Overrides the config seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Fail on unknown symbols instead of falling back.
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Compute indicators from the synthesized history.
        #[arg(long, default_value_t = false)]
        computed_indicators: bool,

        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Synthesize snapshots for every catalog symbol.
    Batch {
        /// Master seed. Overrides the config seed; defaults to 0.
        #[arg(long)]
        seed: Option<u64>,

        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Align history and forecast for charting.
    Chart {
        symbol: String,

        /// Trailing historical points to show.
        #[arg(long)]
        historical_window: Option<usize>,

        /// Leading forecast points to show.
        #[arg(long)]
        forecast_window: Option<usize>,

        /// Write the aligned rows to a CSV file instead of printing JSON.
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        as_of: Option<String>,
    },
    /// Summarize the forecast and interpret the indicator readings.
    Summary {
        symbol: String,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        as_of: Option<String>,
    },
    /// Show model performance and feature importance.
    Models {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Symbols { query, json } => run_symbols(&catalog, query.as_deref(), json),
        Commands::Snapshot {
            symbol,
            seed,
            strict,
            computed_indicators,
            as_of,
        } => {
            if strict {
                config.symbol_policy = SymbolPolicy::Strict;
            }
            if computed_indicators {
                config.indicator_mode = IndicatorMode::Computed;
            }
            let seed = seed.or(config.seed);
            let builder = SnapshotBuilder::new(catalog, config)?;
            let snapshot = build_snapshot(&builder, &symbol, seed, parse_as_of(as_of)?)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        Commands::Batch { seed, as_of } => {
            let seeds = SeedHierarchy::new(seed.or(config.seed).unwrap_or(0));
            let builder = SnapshotBuilder::new(catalog, config)?;
            let snapshots = builder.build_all(parse_as_of(as_of)?, &seeds)?;
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
            Ok(())
        }
        Commands::Chart {
            symbol,
            historical_window,
            forecast_window,
            csv,
            seed,
            as_of,
        } => {
            let aligner = ChartAligner::new(
                historical_window.unwrap_or(config.chart.historical_window),
                forecast_window.unwrap_or(config.chart.forecast_window),
            )?;
            let seed = seed.or(config.seed);
            let builder = SnapshotBuilder::new(catalog, config)?;
            let snapshot = build_snapshot(&builder, &symbol, seed, parse_as_of(as_of)?)?;
            run_chart(&aligner, &snapshot, csv.as_deref())
        }
        Commands::Summary {
            symbol,
            seed,
            as_of,
        } => {
            let seed = seed.or(config.seed);
            let builder = SnapshotBuilder::new(catalog, config)?;
            let snapshot = build_snapshot(&builder, &symbol, seed, parse_as_of(as_of)?)?;
            let summary = PredictionSummary::from_snapshot(&snapshot)?;
            let signals = SignalReport::new(&snapshot.indicator_surface, snapshot.current_price);
            let out = json!({
                "symbol": snapshot.symbol,
                "summary": summary,
                "signals": signals,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Commands::Models { json } => run_models(json),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<SymbolCatalog> {
    match path {
        Some(path) => SymbolCatalog::from_file(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Ok(SymbolCatalog::default_us()),
    }
}

fn parse_as_of(as_of: Option<String>) -> Result<NaiveDate> {
    Ok(as_of
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("--as-of must be YYYY-MM-DD")?
        .unwrap_or_else(|| chrono::Local::now().date_naive()))
}

/// Seeded snapshots derive their source from the canonical catalog symbol,
/// so `snapshot X --seed N` matches the `X` entry of `batch --seed N`.
fn build_snapshot(
    builder: &SnapshotBuilder,
    symbol: &str,
    seed: Option<u64>,
    as_of: NaiveDate,
) -> Result<Snapshot> {
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => {
            let key = builder
                .catalog()
                .resolve(symbol)
                .map(|entry| entry.symbol.as_str())
                .unwrap_or(symbol);
            Box::new(SeedHierarchy::new(seed).source_for(key))
        }
        None => Box::new(RngSource::from_entropy()),
    };
    Ok(builder.build(symbol, as_of, rng.as_mut())?)
}

fn run_symbols(catalog: &SymbolCatalog, query: Option<&str>, json: bool) -> Result<()> {
    let listings = match query {
        Some(q) => catalog.search(q),
        None => catalog.listings(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("No symbols match.");
        return Ok(());
    }
    println!("{:<8} {}", "Symbol", "Name");
    println!("{}", "-".repeat(40));
    for listing in &listings {
        println!("{:<8} {}", listing.symbol, listing.name);
    }
    Ok(())
}

fn run_chart(aligner: &ChartAligner, snapshot: &Snapshot, csv_path: Option<&Path>) -> Result<()> {
    let chart = aligner.align(snapshot)?;

    let Some(path) = csv_path else {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    };

    if chart.is_empty() {
        bail!("aligned chart is empty");
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in chart.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(rows = chart.len(), path = %path.display(), "wrote chart csv");
    Ok(())
}

fn run_models(json: bool) -> Result<()> {
    let registry = ModelRegistry;

    if json {
        let out = json!({
            "performance": registry.performance(),
            "bestModel": registry.best_model().name,
            "featureImportance": registry.feature_importance(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_performance(registry.performance(), registry.best_model());
    print_features(registry.feature_importance(), &registry.relative_importance());
    Ok(())
}

fn print_performance(models: &[ModelPerformance], best: &ModelPerformance) {
    println!();
    println!("=== Model Performance ===");
    println!(
        "{:<22} {:>8} {:>6} {:>6} {:>6}  {:<9} {}",
        "Model", "Accuracy", "MAE", "RMSE", "R²", "Tier", "Description"
    );
    println!("{}", "-".repeat(100));
    for m in models {
        println!(
            "{:<22} {:>7.1}% {:>6.2} {:>6.2} {:>6.3}  {:<9} {}",
            m.name,
            m.accuracy * 100.0,
            m.mae,
            m.rmse,
            m.r2_score,
            format!("{:?}", m.tier()),
            m.description()
        );
    }
    println!();
    println!("Best model:     {} ({:.1}%)", best.name, best.accuracy * 100.0);
    println!("Last updated:   {}", best.last_updated);
}

fn print_features(features: &[FeatureImportance], relative: &[(&str, f64)]) {
    println!();
    println!("=== Feature Importance ===");
    for (feature, (_, share)) in features.iter().zip(relative) {
        let bar = "#".repeat((share * 30.0).round() as usize);
        println!(
            "{:<22} {:>5.1}%  {:<30}  {}",
            feature.feature,
            feature.importance * 100.0,
            bar,
            feature.description
        );
    }
    println!();
}
