//! Series synthesis.
//!
//! Both synthesizers are pure functions of their parameters, the `as_of`
//! date, and the draws they pull from an injected [`RandomSource`]. Output
//! fields are rounded; the walk accumulators are never rounded.
//!
//! [`RandomSource`]: crate::rng::RandomSource

pub mod forecast;
pub mod historical;

pub use forecast::ForecastSynthesizer;
pub use historical::HistorySynthesizer;
