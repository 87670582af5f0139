#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::record::{columns, Record};
    use crate::similarity::{
        compare_feature, jaccard_index, similarity, similarity_breakdown, Feature,
        FeatureComparison, FeatureWeights,
    };
    use std::collections::HashSet;

    fn tool(primary: &str, sources: &str, users: &str, env: &str) -> Record {
        Record::new()
            .with(columns::PRIMARY_FUNCTION, primary)
            .with(columns::DATA_SOURCES, sources)
            .with(columns::TARGET_USER, users)
            .with(columns::ENVIRONMENT_TYPE, env)
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard_identity_and_disjoint() {
        let a = set(&["satellite", "monitoring"]);
        assert_eq!(jaccard_index(&a, &a.clone()), 1.0);

        let b = set(&["risk", "index"]);
        assert_eq!(jaccard_index(&a, &b), 0.0);
    }

    #[test]
    fn test_jaccard_partial_and_empty() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["b", "c", "d"]);
        assert!((jaccard_index(&a, &b) - 0.5).abs() < 1e-12);

        let empty: HashSet<String> = HashSet::new();
        assert_eq!(jaccard_index(&empty, &empty), 0.0);
        assert_eq!(jaccard_index(&a, &empty), 0.0);
    }

    #[test]
    fn test_identical_records_have_similarity_one() {
        let a = tool(
            "satellite monitoring",
            "Satellite imagery, Field surveys",
            "Corporates",
            "Terrestrial",
        );
        let b = a.clone();
        let score = similarity(&a, &b, &FeatureWeights::default());
        assert_eq!(score, 1.0);
        assert_eq!(1.0 - score, 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = tool(
            "Portfolio screening of nature risk",
            "Satellite imagery, Company reports",
            "Financial institutions, Investors",
            "Terrestrial, Marine",
        );
        let b = tool(
            "Nature risk screening for supply chains",
            "Company reports",
            "Corporates, Investors",
            "Terrestrial",
        );
        let w = FeatureWeights::new(0.4, 0.1, 0.35, 0.15);
        assert_eq!(similarity(&a, &b, &w), similarity(&b, &a, &w));
    }

    #[test]
    fn test_similarity_bounds() {
        let records = [
            tool("", "", "", ""),
            tool("data platform", "GBIF", "Researchers", "Freshwater"),
            tool("biodiversity", "biodiversity", "Biodiversity", "biodiversity"),
            tool("data platform", "GBIF, IUCN", "Researchers", "Freshwater, Marine"),
        ];
        let w = FeatureWeights::default();
        for a in &records {
            for b in &records {
                let s = similarity(a, b, &w);
                assert!((0.0..=1.0).contains(&s), "similarity out of bounds: {}", s);
            }
        }
    }

    #[test]
    fn test_full_field_skip_path() {
        // Both values mention only "biodiversity": feature is skipped
        let a = tool("Biodiversity", "Satellite", "", "");
        let b = tool("biodiversity.", "Satellite", "", "");
        assert_eq!(
            compare_feature(&a, &b, Feature::PrimaryFunction),
            FeatureComparison::Skipped
        );

        // Only Data Sources applies (weight 1.0 after dropping the others)
        let w = FeatureWeights::new(0.5, 1.0, 0.0, 0.0);
        assert_eq!(similarity(&a, &b, &w), 1.0);
    }

    #[test]
    fn test_token_filter_path_is_not_a_skip() {
        let a = tool("biodiversity assessment tool", "", "", "");
        let b = tool("biodiversity risk index", "", "", "");
        assert_eq!(
            compare_feature(&a, &b, Feature::PrimaryFunction),
            FeatureComparison::Compared { jaccard: 0.0 }
        );
    }

    #[test]
    fn test_token_filter_removes_biodiversity_from_overlap() {
        let a = tool("biodiversity footprint", "", "", "");
        let b = tool("biodiversity footprint calculator", "", "", "");
        // {footprint} vs {footprint, calculator}
        assert_eq!(
            compare_feature(&a, &b, Feature::PrimaryFunction),
            FeatureComparison::Compared { jaccard: 0.5 }
        );
    }

    #[test]
    fn test_category_filter_removes_biodiversity_value() {
        let a = tool("", "Biodiversity, Species data", "", "");
        let b = tool("", "species data", "", "");
        assert_eq!(
            compare_feature(&a, &b, Feature::DataSources),
            FeatureComparison::Compared { jaccard: 1.0 }
        );
    }

    #[test]
    fn test_one_sided_mention_is_compared() {
        let a = tool("", "", "", "Biodiversity");
        let b = tool("", "", "", "");
        assert_eq!(
            compare_feature(&a, &b, Feature::EnvironmentType),
            FeatureComparison::Compared { jaccard: 0.0 }
        );
    }

    #[test]
    fn test_all_features_skipped_is_zero() {
        let a = tool("biodiversity", "biodiversity", "biodiversity", "biodiversity");
        let b = a.clone();
        assert_eq!(similarity(&a, &b, &FeatureWeights::default()), 0.0);
    }

    #[test]
    fn test_zero_weights_is_zero() {
        let a = tool("satellite monitoring", "GBIF", "NGOs", "Marine");
        let w = FeatureWeights::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(similarity(&a, &a.clone(), &w), 0.0);
    }

    #[test]
    fn test_categorical_split_on_comma_not_semicolon() {
        let a = tool("", "Satellite; Field surveys", "", "");
        let b = tool("", "Satellite, Field surveys", "", "");
        // "satellite; field surveys" vs {"satellite", "field surveys"}
        assert_eq!(
            compare_feature(&a, &b, Feature::DataSources),
            FeatureComparison::Compared { jaccard: 0.0 }
        );
    }

    #[test]
    fn test_weighted_normalization() {
        // Primary function identical, data sources disjoint, others empty
        let a = tool("water risk", "GBIF", "", "");
        let b = tool("water risk", "IUCN", "", "");
        let w = FeatureWeights::new(0.3, 0.25, 0.25, 0.2);
        let score = similarity(&a, &b, &w);
        assert!((score - 0.3).abs() < 1e-12, "got {}", score);
    }

    #[test]
    fn test_breakdown_matches_similarity() {
        let a = tool("biodiversity", "GBIF, IUCN", "NGOs", "Marine");
        let b = tool("Biodiversity", "GBIF", "NGOs, Governments", "Marine");
        let w = FeatureWeights::default();
        let breakdown = similarity_breakdown(&a, &b, &w);

        assert_eq!(breakdown.score, similarity(&a, &b, &w));
        assert_eq!(breakdown.features.len(), 4);
        assert_eq!(breakdown.features[0].feature, Feature::DataSources);

        let primary = breakdown
            .features
            .iter()
            .find(|f| f.feature == Feature::PrimaryFunction)
            .unwrap();
        assert_eq!(primary.comparison, FeatureComparison::Skipped);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let a = Record::new().with(columns::PRIMARY_FUNCTION, "habitat mapping");
        let b = Record::new();
        let score = similarity(&a, &b, &FeatureWeights::default());
        assert_eq!(score, 0.0);
    }
}
