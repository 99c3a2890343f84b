//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Suggestion settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns an [`InvalidConfigValue`](crate::ErrorCode::InvalidConfigValue)
    /// error naming the offending key.
    pub fn validate(&self) -> crate::Result<()> {
        let weights = &self.search.weights;
        for (key, value) in [
            ("search.weights.in_order", weights.in_order),
            ("search.weights.contained", weights.contained),
            ("search.weights.completion", weights.completion),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::invalid_config_value(
                    key,
                    format!("expected a finite, non-negative number, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Suggestion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of suggestions shown
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Catalog file to search instead of the built-in catalog
    #[serde(default)]
    pub catalog: Option<String>,

    /// Scoring weights
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            catalog: None,
            weights: WeightsConfig::default(),
        }
    }
}

fn default_limit() -> usize {
    6
}

/// Points awarded by the subsequence scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightsConfig {
    /// Target character matching the next query character
    #[serde(default = "default_in_order")]
    pub in_order: f64,

    /// Target character skipped while the pending query character occurs elsewhere
    #[serde(default = "default_contained")]
    pub contained: f64,

    /// Whole query matched as a subsequence
    #[serde(default = "default_completion")]
    pub completion: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            in_order: default_in_order(),
            contained: default_contained(),
            completion: default_completion(),
        }
    }
}

fn default_in_order() -> f64 {
    2.0
}

fn default_contained() -> f64 {
    0.5
}

fn default_completion() -> f64 {
    10.0
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact format
    #[serde(default)]
    pub json: bool,

    /// Also append logs to this file
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file: None,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
