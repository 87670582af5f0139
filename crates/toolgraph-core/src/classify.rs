//! Keyword-based category classification
//!
//! Every record gets exactly one [`Category`]. Rules are tried in a fixed
//! order and the first match wins, so a record mentioning both finance and
//! assessment terms is filed under Finance & Investment. Matching is plain
//! substring search over a lowercase blob of the record's text fields, which
//! means stems like `"plan"` also hit `"planet"`.

use std::fmt;

use serde::Serialize;

use crate::record::{columns, Record};

/// Closed set of category labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FinanceInvestment,
    AssessmentMeasurement,
    DataMonitoring,
    PlanningStrategy,
    PolicyGovernance,
    EducationGuidance,
    MarineEcosystems,
    FreshwaterResources,
    TerrestrialForests,
    AgricultureLandUse,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 11] = [
        Category::FinanceInvestment,
        Category::AssessmentMeasurement,
        Category::DataMonitoring,
        Category::PlanningStrategy,
        Category::PolicyGovernance,
        Category::EducationGuidance,
        Category::MarineEcosystems,
        Category::FreshwaterResources,
        Category::TerrestrialForests,
        Category::AgricultureLandUse,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FinanceInvestment => "Finance & Investment",
            Category::AssessmentMeasurement => "Assessment & Measurement",
            Category::DataMonitoring => "Data & Monitoring",
            Category::PlanningStrategy => "Planning & Strategy",
            Category::PolicyGovernance => "Policy & Governance",
            Category::EducationGuidance => "Education & Guidance",
            Category::MarineEcosystems => "Marine Ecosystems",
            Category::FreshwaterResources => "Freshwater Resources",
            Category::TerrestrialForests => "Terrestrial & Forests",
            Category::AgricultureLandUse => "Agriculture & Land Use",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One entry of the ordered rule table
struct Rule {
    category: Category,
    /// Matched case-sensitively against the raw `Environment Type`
    environment_markers: &'static [&'static str],
    keywords: &'static [&'static str],
}

/// Evaluated top to bottom; first match wins
const RULES: &[Rule] = &[
    Rule {
        category: Category::FinanceInvestment,
        environment_markers: &[],
        keywords: &[
            "financ", "invest", "fund", "capital", "monetary", "economic", "budget", "cost",
            "profit",
        ],
    },
    Rule {
        category: Category::AssessmentMeasurement,
        environment_markers: &[],
        keywords: &[
            "assess",
            "evaluat",
            "measur",
            "metric",
            "benchmark",
            "indicator",
            "score",
            "rating",
            "footprint",
            "impact",
        ],
    },
    Rule {
        category: Category::DataMonitoring,
        environment_markers: &[],
        keywords: &[
            "data",
            "monitor",
            "report",
            "collect",
            "database",
            "analytics",
            "information",
            "track",
            "survey",
            "inventory",
        ],
    },
    Rule {
        category: Category::PlanningStrategy,
        environment_markers: &[],
        keywords: &[
            "plan",
            "strateg",
            "manag",
            "decision",
            "framework",
            "roadmap",
            "implement",
            "action",
            "develop",
        ],
    },
    Rule {
        category: Category::PolicyGovernance,
        environment_markers: &[],
        keywords: &[
            "policy",
            "regulat",
            "govern",
            "compliance",
            "standard",
            "law",
            "legal",
            "legislat",
        ],
    },
    Rule {
        category: Category::EducationGuidance,
        environment_markers: &[],
        keywords: &[
            "educat",
            "train",
            "guid",
            "learn",
            "teach",
            "instruct",
            "knowledge",
            "resource",
            "toolkit",
        ],
    },
    Rule {
        category: Category::MarineEcosystems,
        environment_markers: &["Marine"],
        keywords: &["marine", "ocean", "sea", "coastal", "fish"],
    },
    Rule {
        category: Category::FreshwaterResources,
        environment_markers: &["Freshwater"],
        keywords: &[
            "freshwater",
            "water",
            "river",
            "lake",
            "aquatic",
            "wetland",
        ],
    },
    Rule {
        category: Category::TerrestrialForests,
        environment_markers: &["Terrestrial", "Forests"],
        keywords: &["forest", "terrestrial", "land", "soil", "tree"],
    },
    Rule {
        category: Category::AgricultureLandUse,
        environment_markers: &["Agricultural"],
        keywords: &["agricultur", "farm", "crop", "livestock", "food"],
    },
];

/// Terms that keep an unmatched record in [`Category::Other`]
const DISTINCTIVE_KEYWORDS: &[&str] = &[
    "blockchain",
    "ai",
    "artificial intelligence",
    "machine learning",
    "certification",
    "labeling",
    "virtual reality",
    "augmented reality",
    "simulation",
    "game",
    "offset",
    "credit",
    "compensation",
];

const ASSESSMENT_STEMS: &[&str] = &["assess", "measur", "evaluat"];

/// Environment type assumed when the column is blank
const DEFAULT_ENVIRONMENT: &str = "Multiple";

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Lowercased blob of every text field used for matching
fn text_blob(record: &Record) -> String {
    format!(
        "{} {} {} {} {}",
        record.get(columns::PRIMARY_FUNCTION),
        record.get(columns::TARGET_USER),
        record.get(columns::DATA_SOURCES),
        record.get(columns::DESCRIPTION),
        record.get(columns::TOOL_NAME),
    )
    .to_lowercase()
}

/// Assign a record to exactly one category
///
/// Deterministic and total. Records that match no rule fall back to
/// Assessment & Measurement unless they carry a distinctive term such as
/// "blockchain" or "offset", which keeps them in Other.
pub fn classify(record: &Record) -> Category {
    let text = text_blob(record);
    let environment = record
        .get_non_empty(columns::ENVIRONMENT_TYPE)
        .unwrap_or(DEFAULT_ENVIRONMENT);

    let matched = RULES.iter().find(|rule| {
        contains_any(environment, rule.environment_markers) || contains_any(&text, rule.keywords)
    });

    if let Some(rule) = matched {
        return rule.category;
    }

    if text.contains(crate::similarity::EXCLUDED_TERM) && contains_any(&text, ASSESSMENT_STEMS) {
        return Category::AssessmentMeasurement;
    }

    if contains_any(&text, DISTINCTIVE_KEYWORDS) {
        Category::Other
    } else {
        Category::AssessmentMeasurement
    }
}
