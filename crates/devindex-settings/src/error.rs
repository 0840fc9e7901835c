//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems, reported once before any index is computed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported configuration file extension: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Category '{0}' is declared more than once")]
    DuplicateCategory(String),

    #[error("Category '{0}' has no weight in category_weights")]
    MissingCategoryWeight(String),

    #[error("category_weights references undeclared category '{0}'")]
    UndeclaredCategory(String),

    #[error("Category '{name}' weight {weight} is outside [0, 1]")]
    CategoryWeightOutOfRange { name: String, weight: f64 },

    #[error("Category weights sum to {sum:.3}; expected a total above 0 and at most 1")]
    CategoryWeightSum { sum: f64 },

    #[error("Metric key must not be empty")]
    EmptyMetricKey,

    #[error("Metric '{0}' is declared more than once")]
    DuplicateMetric(String),

    #[error("Metric '{metric}' references unknown category '{category}'")]
    UnknownCategory { metric: String, category: String },

    #[error("Invalid {policy} policy: {reason}")]
    InvalidPolicy {
        policy: &'static str,
        reason: String,
    },

    #[error("Metric '{metric}' weight {weight} is outside [0, 1]")]
    MetricWeightOutOfRange { metric: String, weight: f64 },
}
