//! Moving Average Convergence Divergence (MACD).
//!
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal), seeded once the line is valid
//! - Histogram: line - signal
//!
//! Warmup: slow - 1 for the line, slow + signal - 2 for signal/histogram.

use super::ema::{ema_after_warmup, ema_of_series};
use super::Indicator;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
}

impl Macd {
    /// `fast` should be shorter than `slow`; nothing enforces it, the line
    /// simply changes sign.
    pub const fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        Self {
            fast,
            slow,
            signal,
            line,
        }
    }

    /// 12/26/9.
    pub const fn standard(line: MacdLine) -> Self {
        Self::new(12, 26, 9, line)
    }

    fn macd_line(&self, closes: &[f64]) -> Vec<f64> {
        let fast = ema_of_series(closes, self.fast);
        let slow = ema_of_series(closes, self.slow);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> String {
        let kind = match self.line {
            MacdLine::Line => "line",
            MacdLine::Signal => "signal",
            MacdLine::Histogram => "histogram",
        };
        format!("macd_{kind}_{}_{}_{}", self.fast, self.slow, self.signal)
    }

    fn warmup(&self) -> usize {
        let line = self.fast.max(self.slow).saturating_sub(1);
        match self.line {
            MacdLine::Line => line,
            MacdLine::Signal | MacdLine::Histogram => line + self.signal.saturating_sub(1),
        }
    }

    fn series(&self, closes: &[f64]) -> Vec<f64> {
        let line = self.macd_line(closes);
        if self.line == MacdLine::Line {
            return line;
        }
        let signal = ema_after_warmup(&line, self.signal);
        match self.line {
            MacdLine::Histogram => line.iter().zip(&signal).map(|(l, s)| l - s).collect(),
            _ => signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_close;

    fn trending(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn warmup_lengths() {
        let closes = trending(60);
        let line = Macd::standard(MacdLine::Line);
        let signal = Macd::standard(MacdLine::Signal);

        let l = line.series(&closes);
        let s = signal.series(&closes);
        assert_eq!(line.warmup(), 25);
        assert_eq!(signal.warmup(), 33);
        assert!(l[24].is_nan() && !l[25].is_nan());
        assert!(s[32].is_nan() && !s[33].is_nan());
    }

    #[test]
    fn constant_prices_give_zero_macd() {
        let closes = vec![50.0; 60];
        let hist = Macd::standard(MacdLine::Histogram).series(&closes);
        assert_close(hist[59], 0.0);
        let line = Macd::standard(MacdLine::Line).series(&closes);
        assert_close(line[59], 0.0);
    }

    #[test]
    fn uptrend_has_positive_line() {
        let line = Macd::standard(MacdLine::Line).latest(&trending(80)).unwrap();
        assert!(line > 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let line = Macd::standard(MacdLine::Line).series(&closes);
        let signal = Macd::standard(MacdLine::Signal).series(&closes);
        let hist = Macd::standard(MacdLine::Histogram).series(&closes);
        assert_close(hist[79], line[79] - signal[79]);
    }
}
