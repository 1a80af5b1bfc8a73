//! Symbol catalog: ticker, display name, and base price.
//!
//! The catalog is a small ordered registry. Order matters: the first entry
//! is the fallback used when a lenient lookup misses. It can be loaded from
//! a TOML file with one `[[symbols]]` table per entry.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ensure_positive_price, EngineError, Result};

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub symbol: String,
    pub name: String,
    pub base_price: f64,
}

/// `{symbol, name}` pair for selection UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolListing {
    pub symbol: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    symbols: Vec<CatalogEntry>,
}

/// Non-empty, duplicate-free list of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolCatalog {
    entries: Vec<CatalogEntry>,
}

impl SymbolCatalog {
    /// Build a catalog, rejecting empty tables, duplicate symbols and
    /// non-positive base prices.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(EngineError::Catalog("catalog has no symbols".into()));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.symbol.trim().is_empty() {
                return Err(EngineError::Catalog("empty symbol in catalog".into()));
            }
            if !seen.insert(entry.symbol.to_ascii_uppercase()) {
                return Err(EngineError::Catalog(format!(
                    "duplicate symbol '{}'",
                    entry.symbol
                )));
            }
            ensure_positive_price(&format!("base price of {}", entry.symbol), entry.base_price)?;
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Catalog(format!("read catalog file {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| EngineError::Catalog(format!("parse catalog TOML: {e}")))?;
        Self::new(file.symbols)
    }

    /// Serialize the catalog to TOML.
    pub fn to_toml(&self) -> Result<String> {
        let file = CatalogFile {
            symbols: self.entries.clone(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| EngineError::Catalog(format!("serialize catalog: {e}")))
    }

    /// The built-in table of ten large-cap US equities.
    pub fn default_us() -> Self {
        let entries = [
            ("AAPL", "Apple Inc.", 175.43),
            ("GOOGL", "Alphabet Inc.", 142.56),
            ("MSFT", "Microsoft Corporation", 378.85),
            ("AMZN", "Amazon.com Inc.", 145.86),
            ("TSLA", "Tesla Inc.", 248.50),
            ("NVDA", "NVIDIA Corporation", 875.28),
            ("META", "Meta Platforms Inc.", 353.96),
            ("NFLX", "Netflix Inc.", 442.60),
            ("JPM", "JPMorgan Chase & Co.", 154.78),
            ("V", "Visa Inc.", 267.92),
        ]
        .into_iter()
        .map(|(symbol, name, base_price)| CatalogEntry {
            symbol: symbol.into(),
            name: name.into(),
            base_price,
        })
        .collect();

        Self { entries }
    }

    /// Exact symbol lookup, ignoring ASCII case.
    pub fn resolve(&self, symbol: &str) -> Option<&CatalogEntry> {
        let wanted = symbol.trim();
        self.entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(wanted))
    }

    /// Fallback entry for lenient lookups.
    pub fn first(&self) -> &CatalogEntry {
        &self.entries[0]
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `{symbol, name}` pairs in catalog order.
    pub fn listings(&self) -> Vec<SymbolListing> {
        self.entries.iter().map(listing).collect()
    }

    /// Typeahead filter: case-insensitive substring match on symbol or name.
    /// A blank query returns every listing.
    pub fn search(&self, query: &str) -> Vec<SymbolListing> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.symbol.to_lowercase().contains(&needle)
                    || e.name.to_lowercase().contains(&needle)
            })
            .map(listing)
            .collect()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::default_us()
    }
}

fn listing(entry: &CatalogEntry) -> SymbolListing {
    SymbolListing {
        symbol: entry.symbol.clone(),
        name: entry.name.clone(),
    }
}
