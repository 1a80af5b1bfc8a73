//! Relative Strength Index with Wilder smoothing.
//!
//! The first reading (index `period`) averages the first `period` close-to-
//! close moves; later readings smooth with `1 / period`. A window with no
//! movement at all reads 50.

use super::{aligned, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub const fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> String {
        format!("rsi_{}", self.period)
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn series(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        if self.period == 0 || n <= self.period {
            return vec![f64::NAN; n];
        }

        let moves: Vec<(f64, f64)> = closes
            .windows(2)
            .map(|w| {
                let delta = w[1] - w[0];
                (delta.max(0.0), (-delta).max(0.0))
            })
            .collect();
        // `max` swallows NaN, so taint has to be tracked separately.
        let tainted_from = closes
            .windows(2)
            .position(|w| w[0].is_nan() || w[1].is_nan())
            .unwrap_or(usize::MAX);

        let p = self.period as f64;
        let (seed, rest) = moves.split_at(self.period);
        let mut gain = seed.iter().map(|m| m.0).sum::<f64>() / p;
        let mut loss = seed.iter().map(|m| m.1).sum::<f64>() / p;

        let mut readings = Vec::with_capacity(n - self.period);
        readings.push(strength(gain, loss));
        for &(g, l) in rest {
            gain = (gain * (p - 1.0) + g) / p;
            loss = (loss * (p - 1.0) + l) / p;
            readings.push(strength(gain, loss));
        }

        let mut out = aligned(n, self.period, readings);
        // Reading i covers moves 0..i, so the first tainted move at index k
        // invalidates readings from k + 1 on.
        if let Some(start) = tainted_from.checked_add(1) {
            for v in out.iter_mut().skip(start) {
                *v = f64::NAN;
            }
        }
        out
    }
}

fn strength(avg_gain: f64, avg_loss: f64) -> f64 {
    match (avg_gain > 0.0, avg_loss > 0.0) {
        (false, false) => 50.0,
        (true, false) => 100.0,
        (false, true) => 0.0,
        (true, true) => 100.0 - 100.0 / (1.0 + avg_gain / avg_loss),
    }
}
