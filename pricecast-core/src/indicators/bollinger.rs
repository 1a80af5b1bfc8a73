//! Bollinger Bands: trailing mean ± `multiplier` population standard
//! deviations. Each band is its own indicator so the surface can read them
//! independently.

use super::{aligned, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

impl BollingerBand {
    fn sign(self) -> f64 {
        match self {
            Self::Upper => 1.0,
            Self::Middle => 0.0,
            Self::Lower => -1.0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Middle => "middle",
            Self::Lower => "lower",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bollinger {
    band: BollingerBand,
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub const fn new(band: BollingerBand, period: usize, multiplier: f64) -> Self {
        Self {
            band,
            period,
            multiplier,
        }
    }

    pub const fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Upper, period, multiplier)
    }

    pub const fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Middle, period, multiplier)
    }

    pub const fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Lower, period, multiplier)
    }
}

/// Mean and population standard deviation of a window.
fn mean_std(window: &[f64]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

impl Indicator for Bollinger {
    fn name(&self) -> String {
        format!(
            "bollinger_{}_{}_{}",
            self.band.label(),
            self.period,
            self.multiplier
        )
    }

    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn series(&self, closes: &[f64]) -> Vec<f64> {
        if self.period == 0 {
            return vec![f64::NAN; closes.len()];
        }
        let offset = self.band.sign() * self.multiplier;
        let values = closes.windows(self.period).map(|w| {
            let (mean, std) = mean_std(w);
            if offset == 0.0 {
                mean
            } else {
                mean + offset * std
            }
        });
        aligned(closes.len(), self.warmup(), values)
    }
}
