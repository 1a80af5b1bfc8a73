//! Static model registry: reported performance and feature importance.
//!
//! The numbers are fixed reference figures, not measured by this crate.

use serde::Serialize;

use crate::domain::ForecastModel;

pub const PERFORMANCE_LAST_UPDATED: &str = "2024-01-15T10:30:00Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Strong,
    Moderate,
    Weak,
}

impl PerformanceTier {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy > 0.85 {
            Self::Strong
        } else if accuracy > 0.75 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub model: ForecastModel,
    pub name: &'static str,
    pub accuracy: f64,
    pub mae: f64,
    pub rmse: f64,
    pub r2_score: f64,
    pub last_updated: &'static str,
}

impl ModelPerformance {
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_accuracy(self.accuracy)
    }

    pub fn description(&self) -> &'static str {
        description(self.model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
    pub description: &'static str,
}

const fn perf(
    model: ForecastModel,
    name: &'static str,
    accuracy: f64,
    mae: f64,
    rmse: f64,
    r2_score: f64,
) -> ModelPerformance {
    ModelPerformance {
        model,
        name,
        accuracy,
        mae,
        rmse,
        r2_score,
        last_updated: PERFORMANCE_LAST_UPDATED,
    }
}

const PERFORMANCE: [ModelPerformance; 4] = [
    perf(ForecastModel::Lstm, "LSTM Neural Network", 0.847, 2.34, 3.12, 0.923),
    perf(ForecastModel::RandomForest, "Random Forest", 0.812, 2.78, 3.45, 0.896),
    perf(ForecastModel::Arima, "ARIMA", 0.789, 3.12, 4.01, 0.873),
    perf(ForecastModel::XgBoost, "XGBoost", 0.825, 2.56, 3.28, 0.908),
];

// Descending by importance.
const FEATURES: [FeatureImportance; 7] = [
    FeatureImportance {
        feature: "Previous Close Price",
        importance: 0.342,
        description: "Previous trading day closing price",
    },
    FeatureImportance {
        feature: "Trading Volume",
        importance: 0.187,
        description: "Daily trading volume in shares",
    },
    FeatureImportance {
        feature: "Moving Average (20d)",
        importance: 0.156,
        description: "20-day simple moving average",
    },
    FeatureImportance {
        feature: "RSI (14d)",
        importance: 0.123,
        description: "14-day Relative Strength Index",
    },
    FeatureImportance {
        feature: "Market Volatility",
        importance: 0.089,
        description: "Market-wide volatility index",
    },
    FeatureImportance {
        feature: "Sector Performance",
        importance: 0.067,
        description: "Industry sector performance",
    },
    FeatureImportance {
        feature: "News Sentiment",
        importance: 0.036,
        description: "Sentiment analysis of news articles",
    },
];

pub fn description(model: ForecastModel) -> &'static str {
    match model {
        ForecastModel::Lstm => "Deep learning neural network for time series",
        ForecastModel::RandomForest => "Ensemble method using decision trees",
        ForecastModel::Arima => "Statistical model for time series analysis",
        ForecastModel::XgBoost => "Gradient boosting algorithm",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRegistry;

impl ModelRegistry {
    pub fn performance(&self) -> &'static [ModelPerformance] {
        &PERFORMANCE
    }

    pub fn performance_of(&self, model: ForecastModel) -> Option<&'static ModelPerformance> {
        PERFORMANCE.iter().find(|p| p.model == model)
    }

    /// Highest-accuracy model.
    pub fn best_model(&self) -> &'static ModelPerformance {
        let mut best = &PERFORMANCE[0];
        for p in &PERFORMANCE[1..] {
            if p.accuracy > best.accuracy {
                best = p;
            }
        }
        best
    }

    pub fn feature_importance(&self) -> &'static [FeatureImportance] {
        &FEATURES
    }

    /// Each feature's importance as a share of the largest one.
    pub fn relative_importance(&self) -> Vec<(&'static str, f64)> {
        let max = FEATURES
            .iter()
            .map(|f| f.importance)
            .fold(f64::NEG_INFINITY, f64::max);
        FEATURES
            .iter()
            .map(|f| (f.feature, f.importance / max))
            .collect()
    }
}
