//! Weighted Jaccard similarity between catalog records
//!
//! Each of the four features yields a Jaccard index over word tokens
//! (Primary Function) or comma-separated categories (the rest). The term
//! "biodiversity" is treated as noise: it is filtered out of token and
//! category sets, and a feature where both sides mention it but have nothing
//! else to compare is skipped for that pair, dropping out of both the
//! weighted sum and the normalizing weight total.

mod weights;

pub use weights::{Feature, FeatureKind, FeatureWeights};

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

use crate::record::Record;
use crate::text::{normalize_category_set, tokenize};

/// Term excluded from comparisons
pub const EXCLUDED_TERM: &str = "biodiversity";

/// Jaccard index |A ∩ B| / |A ∪ B|, 0 when both sets are empty
pub fn jaccard_index<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Outcome of comparing one feature of a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum FeatureComparison {
    /// Excluded from this pair's score and normalization
    Skipped,
    /// Jaccard index of the filtered sets
    Compared { jaccard: f64 },
}

/// Per-feature contribution, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureScore {
    pub feature: Feature,
    pub weight: f64,
    #[serde(flatten)]
    pub comparison: FeatureComparison,
}

/// Full similarity report for one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub features: Vec<FeatureScore>,
    pub score: f64,
}

fn mentions_excluded_term(value: &str) -> bool {
    value.to_lowercase().contains(EXCLUDED_TERM)
}

/// Comparable set for a feature value, with the excluded term removed
fn comparison_set(kind: FeatureKind, value: &str) -> HashSet<String> {
    let items = match kind {
        FeatureKind::Text => tokenize(value).into_iter().collect::<HashSet<_>>(),
        FeatureKind::Categorical => normalize_category_set(value),
    };
    items
        .into_iter()
        .filter(|item| item != EXCLUDED_TERM)
        .collect()
}

/// Compare a single feature of two records
pub fn compare_feature(a: &Record, b: &Record, feature: Feature) -> FeatureComparison {
    let value_a = a.get(feature.column());
    let value_b = b.get(feature.column());

    let set_a = comparison_set(feature.kind(), value_a);
    let set_b = comparison_set(feature.kind(), value_b);

    // Both sides mention only the excluded term: nothing to compare
    if set_a.is_empty()
        && set_b.is_empty()
        && mentions_excluded_term(value_a)
        && mentions_excluded_term(value_b)
    {
        return FeatureComparison::Skipped;
    }

    FeatureComparison::Compared {
        jaccard: jaccard_index(&set_a, &set_b),
    }
}

/// Weighted mean over the features that were not skipped
fn weighted_score(parts: impl Iterator<Item = (f64, FeatureComparison)>) -> f64 {
    let mut similarity = 0.0;
    let mut total_weight = 0.0;

    for (weight, comparison) in parts {
        if let FeatureComparison::Compared { jaccard } = comparison {
            similarity += weight * jaccard;
            total_weight += weight;
        }
    }

    if total_weight > 0.0 {
        similarity / total_weight
    } else {
        0.0
    }
}

/// Weighted similarity of two records, in `[0, 1]`
///
/// Symmetric in `a` and `b`. Returns 0 when every feature is skipped or all
/// applied weights are zero.
pub fn similarity(a: &Record, b: &Record, weights: &FeatureWeights) -> f64 {
    weighted_score(
        Feature::ALL
            .iter()
            .map(|&feature| (weights.weight(feature), compare_feature(a, b, feature))),
    )
}

/// Same score as [`similarity`], with each feature's contribution
pub fn similarity_breakdown(a: &Record, b: &Record, weights: &FeatureWeights) -> SimilarityBreakdown {
    let features: Vec<FeatureScore> = Feature::ALL
        .iter()
        .map(|&feature| FeatureScore {
            feature,
            weight: weights.weight(feature),
            comparison: compare_feature(a, b, feature),
        })
        .collect();

    let score = weighted_score(features.iter().map(|f| (f.weight, f.comparison)));

    SimilarityBreakdown { features, score }
}

#[cfg(test)]
mod tests;
