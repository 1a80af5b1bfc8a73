//! Domain types for PriceCast

pub mod point;
pub mod snapshot;

pub use point::{ForecastModel, ForecastPoint, HistoricalPoint};
pub use snapshot::{Snapshot, SymbolResolution};

/// Round to currency precision (2 decimals).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimals (confidence values).
pub fn round3(value: f64) -> f64 {
    (value * 1_000.0).round() / 1_000.0
}

/// Round to 1 decimal (oscillator readings).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_precision() {
        assert_eq!(round2(90.0091), 90.01);
        assert_eq!(round2(97.1299), 97.13);
        assert_eq!(round3(0.9399999999999999), 0.94);
        assert_eq!(round1(49.96), 50.0);
    }
}
