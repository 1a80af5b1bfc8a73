//! Simple moving average: mean of the trailing `period` closes.

use super::{aligned, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub const fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> String {
        format!("sma_{}", self.period)
    }

    fn warmup(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn series(&self, closes: &[f64]) -> Vec<f64> {
        if self.period == 0 {
            return vec![f64::NAN; closes.len()];
        }
        let p = self.period as f64;
        // Summing each window keeps a NaN local to the windows that hold it.
        let means = closes.windows(self.period).map(|w| w.iter().sum::<f64>() / p);
        aligned(closes.len(), self.warmup(), means)
    }
}
