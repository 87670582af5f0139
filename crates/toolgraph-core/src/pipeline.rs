//! End-to-end processing of a catalog into output entities

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, Category};
use crate::cluster::{cluster, ClusterNode};
use crate::graph::generate_connections;
use crate::id::{assign_ids, IdGenerator, RandomIdGenerator};
use crate::matrix::build_distance_matrix;
use crate::record::{columns, Record, Tool};
use crate::similarity::FeatureWeights;
use crate::trace_time;

/// Default similarity threshold for connections
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Relevance assigned to every entity
pub const DEFAULT_RELEVANCE: f64 = 0.75;

/// Tunables for one `process` run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessOptions {
    pub threshold: f64,
    pub weights: FeatureWeights,
    pub relevance: f64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptions {
            threshold: DEFAULT_THRESHOLD,
            weights: FeatureWeights::default(),
            relevance: DEFAULT_RELEVANCE,
        }
    }
}

/// A processed catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEntity {
    pub id: String,
    pub name: String,
    pub category: String,
    pub relevance: f64,
    pub connections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OutputEntity {
    fn new(tool: &Tool, category: Category, relevance: f64, connections: Vec<String>) -> Self {
        let field = |column: &str| tool.record.get_non_empty(column).map(str::to_string);

        OutputEntity {
            id: tool.id.clone(),
            name: tool.display_name(),
            category: category.to_string(),
            relevance,
            connections,
            primary_function: field(columns::PRIMARY_FUNCTION),
            data_sources: field(columns::DATA_SOURCES),
            target_user: field(columns::TARGET_USER),
            environment_type: field(columns::ENVIRONMENT_TYPE),
            description: field(columns::DESCRIPTION),
        }
    }
}

/// Process records with default relevance and random fallback ids
///
/// Empty input yields empty output.
pub fn process(records: &[Record], threshold: f64, weights: &FeatureWeights) -> Vec<OutputEntity> {
    let options = ProcessOptions {
        threshold,
        weights: *weights,
        ..ProcessOptions::default()
    };
    process_with(records, &options, &mut RandomIdGenerator)
}

/// Process records with an explicit id generator
///
/// Output order matches input order. Categories and connections depend only
/// on the records, weights and threshold; the generator affects ids of
/// unnamed or colliding records and nothing else.
pub fn process_with(
    records: &[Record],
    options: &ProcessOptions,
    generator: &mut dyn IdGenerator,
) -> Vec<OutputEntity> {
    if records.is_empty() {
        debug!("process: empty catalog");
        return Vec::new();
    }

    let start = Instant::now();

    let tools = assign_ids(records, generator);
    let matrix = build_distance_matrix(records, &options.weights);
    let mut connections = generate_connections(&tools, &matrix, options.threshold);

    let entities: Vec<OutputEntity> = tools
        .iter()
        .map(|tool| {
            let category = classify(&tool.record);
            let neighbors = connections.take(&tool.id);
            OutputEntity::new(tool, category, options.relevance, neighbors)
        })
        .collect();

    debug!(
        entities = entities.len(),
        threshold = options.threshold,
        "process"
    );
    trace_time!(start, "process");

    entities
}

/// Dendrogram over tools, labelled by tool id
pub fn cluster_tools(tools: &[Tool], weights: &FeatureWeights) -> Option<ClusterNode> {
    let records: Vec<Record> = tools.iter().map(|tool| tool.record.clone()).collect();
    let labels: Vec<&str> = tools.iter().map(|tool| tool.id.as_str()).collect();
    let matrix = build_distance_matrix(&records, weights);

    // One label per matrix row by construction
    match cluster(&matrix, &labels) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "cluster_tools");
            None
        }
    }
}

/// Dendrogram over raw records, with ids assigned as in [`process`]
pub fn cluster_catalog(records: &[Record], weights: &FeatureWeights) -> Option<ClusterNode> {
    let tools = assign_ids(records, &mut RandomIdGenerator);
    cluster_tools(&tools, weights)
}
