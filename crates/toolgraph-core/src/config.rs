//! Engine configuration
//!
//! Stored as TOML. Missing keys take their defaults, so an empty file is a
//! valid configuration:
//!
//! ```toml
//! threshold = 0.7
//! relevance = 0.75
//!
//! [weights]
//! "Primary Function" = 0.3
//! "Data Sources" = 0.25
//! "Target User/Client" = 0.25
//! "Environment Type" = 0.2
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{Result, ToolgraphError};
use crate::pipeline::{ProcessOptions, DEFAULT_RELEVANCE, DEFAULT_THRESHOLD};
use crate::similarity::FeatureWeights;

/// Similarity engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum similarity for two tools to be connected
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Relevance written on every output entity
    #[serde(default = "default_relevance")]
    pub relevance: f64,

    #[serde(default)]
    pub weights: FeatureWeights,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_relevance() -> f64 {
    DEFAULT_RELEVANCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            threshold: default_threshold(),
            relevance: default_relevance(),
            weights: FeatureWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ToolgraphError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject non-finite numbers and negative weights
    ///
    /// The threshold is not range-checked: values above 1 simply produce no
    /// connections and values at or below 0 connect everything.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            bail_invalid!("threshold", self.threshold);
        }
        if !self.relevance.is_finite() {
            bail_invalid!("relevance", self.relevance);
        }
        self.weights.validate()
    }

    pub fn to_options(&self) -> ProcessOptions {
        ProcessOptions {
            threshold: self.threshold,
            weights: self.weights,
            relevance: self.relevance,
        }
    }
}
