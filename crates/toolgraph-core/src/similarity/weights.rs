use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::Result;
use crate::record::columns;

/// How a feature's cell text is turned into a comparable set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Free text, compared by word tokens
    Text,
    /// Comma-separated categories
    Categorical,
}

/// A weighted feature of the similarity metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Primary Function")]
    PrimaryFunction,
    #[serde(rename = "Data Sources")]
    DataSources,
    #[serde(rename = "Target User/Client")]
    TargetUser,
    #[serde(rename = "Environment Type")]
    EnvironmentType,
}

impl Feature {
    /// Evaluation order; fixed so floating-point sums are reproducible
    pub const ALL: [Feature; 4] = [
        Feature::DataSources,
        Feature::PrimaryFunction,
        Feature::TargetUser,
        Feature::EnvironmentType,
    ];

    /// Catalog column this feature reads
    pub fn column(self) -> &'static str {
        match self {
            Feature::PrimaryFunction => columns::PRIMARY_FUNCTION,
            Feature::DataSources => columns::DATA_SOURCES,
            Feature::TargetUser => columns::TARGET_USER,
            Feature::EnvironmentType => columns::ENVIRONMENT_TYPE,
        }
    }

    pub fn kind(self) -> FeatureKind {
        match self {
            Feature::PrimaryFunction => FeatureKind::Text,
            _ => FeatureKind::Categorical,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

fn default_primary_function() -> f64 {
    0.3
}

fn default_data_sources() -> f64 {
    0.25
}

fn default_target_user() -> f64 {
    0.25
}

fn default_environment_type() -> f64 {
    0.2
}

/// Per-feature weights of the similarity metric
///
/// Weights need not sum to 1; similarity is normalized by the weights that
/// actually applied to a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    #[serde(rename = "Primary Function", default = "default_primary_function")]
    pub primary_function: f64,

    #[serde(rename = "Data Sources", default = "default_data_sources")]
    pub data_sources: f64,

    #[serde(rename = "Target User/Client", default = "default_target_user")]
    pub target_user: f64,

    #[serde(rename = "Environment Type", default = "default_environment_type")]
    pub environment_type: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            primary_function: default_primary_function(),
            data_sources: default_data_sources(),
            target_user: default_target_user(),
            environment_type: default_environment_type(),
        }
    }
}

impl FeatureWeights {
    pub fn new(
        primary_function: f64,
        data_sources: f64,
        target_user: f64,
        environment_type: f64,
    ) -> Self {
        Self {
            primary_function,
            data_sources,
            target_user,
            environment_type,
        }
    }

    pub fn weight(&self, feature: Feature) -> f64 {
        match feature {
            Feature::PrimaryFunction => self.primary_function,
            Feature::DataSources => self.data_sources,
            Feature::TargetUser => self.target_user,
            Feature::EnvironmentType => self.environment_type,
        }
    }

    pub fn set_weight(&mut self, feature: Feature, weight: f64) {
        match feature {
            Feature::PrimaryFunction => self.primary_function = weight,
            Feature::DataSources => self.data_sources = weight,
            Feature::TargetUser => self.target_user = weight,
            Feature::EnvironmentType => self.environment_type = weight,
        }
    }

    /// Reject negative or non-finite weights
    pub fn validate(&self) -> Result<()> {
        for feature in Feature::ALL {
            let weight = self.weight(feature);
            if !weight.is_finite() || weight < 0.0 {
                bail_invalid!(&format!("weight for {}", feature), weight);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = FeatureWeights::default();
        assert_eq!(w.weight(Feature::PrimaryFunction), 0.3);
        assert_eq!(w.weight(Feature::DataSources), 0.25);
        assert_eq!(w.weight(Feature::TargetUser), 0.25);
        assert_eq!(w.weight(Feature::EnvironmentType), 0.2);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(FeatureWeights::default().validate().is_ok());
        assert!(FeatureWeights::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());
        assert!(FeatureWeights::new(-0.1, 0.2, 0.2, 0.2).validate().is_err());
        assert!(FeatureWeights::new(0.1, f64::NAN, 0.2, 0.2)
            .validate()
            .is_err());
        assert!(FeatureWeights::new(0.1, 0.2, f64::INFINITY, 0.2)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_value(FeatureWeights::default()).unwrap();
        assert_eq!(json["Primary Function"], 0.3);
        assert_eq!(json["Target User/Client"], 0.25);

        let parsed: FeatureWeights =
            serde_json::from_str(r#"{"Data Sources": 1.0}"#).unwrap();
        assert_eq!(parsed.data_sources, 1.0);
        assert_eq!(parsed.primary_function, 0.3);
    }

    #[test]
    fn test_set_weight() {
        let mut w = FeatureWeights::default();
        w.set_weight(Feature::EnvironmentType, 0.9);
        assert_eq!(w.environment_type, 0.9);
    }
}
