//! Threshold-based connection graph between tools

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::matrix::DistanceMatrix;
use crate::record::Tool;
use crate::trace_time;

/// Symmetric adjacency lists keyed by tool id
///
/// Every tool passed to [`generate_connections`] has an entry, possibly
/// empty. Neighbor order is the row-major pair scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConnectionMap {
    adjacency: HashMap<String, Vec<String>>,
}

impl ConnectionMap {
    /// Neighbors of a tool; empty for unknown ids
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn is_connected(&self, a: &str, b: &str) -> bool {
        self.neighbors(a).iter().any(|n| n == b)
    }

    /// Number of tools with an entry
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Take a tool's neighbor list out of the map
    pub fn take(&mut self, id: &str) -> Vec<String> {
        self.adjacency
            .get_mut(id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn connect(&mut self, a: &str, b: &str) {
        if let Some(list) = self.adjacency.get_mut(a) {
            list.push(b.to_string());
        }
        if let Some(list) = self.adjacency.get_mut(b) {
            list.push(a.to_string());
        }
    }
}

/// Whether a pair stored at `distance` is connected at `threshold`
///
/// Every connection verdict goes through here so that a score recomputed
/// outside the matrix agrees with [`generate_connections`] at the boundary.
pub fn meets_threshold(distance: f64, threshold: f64) -> bool {
    1.0 - distance >= threshold
}

/// Connect every pair whose similarity `1 - distance` is at least `threshold`
///
/// `tools[i]` must correspond to row `i` of the matrix, so both must have the
/// same length. The threshold is not range-checked.
pub fn generate_connections(
    tools: &[Tool],
    matrix: &DistanceMatrix,
    threshold: f64,
) -> ConnectionMap {
    debug_assert_eq!(
        tools.len(),
        matrix.len(),
        "one matrix row per tool is required"
    );
    let start = Instant::now();
    let n = tools.len().min(matrix.len());

    let mut connections = ConnectionMap {
        adjacency: tools
            .iter()
            .map(|tool| (tool.id.clone(), Vec::new()))
            .collect(),
    };

    for i in 0..n {
        for j in (i + 1)..n {
            if meets_threshold(matrix.get(i, j), threshold) {
                connections.connect(&tools[i].id, &tools[j].id);
            }
        }
    }

    debug!(
        tools = tools.len(),
        edges = connections.edge_count(),
        threshold,
        "connections"
    );
    trace_time!(start, "generate_connections");

    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{build_distance_matrix, to_distance};
    use crate::record::{columns, Record};
    use crate::similarity::{similarity, FeatureWeights};

    fn tools(ids: &[&str]) -> Vec<Tool> {
        ids.iter().map(|id| Tool::new(*id, Record::new())).collect()
    }

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 0.25, 0.5],
            vec![0.25, 0.0, 0.9],
            vec![0.5, 0.9, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_threshold_inclusion() {
        let tools = tools(&["a", "b", "c"]);
        let m = matrix();

        let at_07 = generate_connections(&tools, &m, 0.7);
        assert!(at_07.is_connected("a", "b"));
        assert!(at_07.is_connected("b", "a"));
        assert!(!at_07.is_connected("a", "c"));

        let at_08 = generate_connections(&tools, &m, 0.8);
        assert!(!at_08.is_connected("a", "b"));
        assert_eq!(at_08.edge_count(), 0);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let tools = tools(&["a", "b", "c"]);
        let connections = generate_connections(&tools, &matrix(), 0.5);
        assert!(connections.is_connected("a", "c"));
        assert_eq!(connections.edge_count(), 2);
    }

    #[test]
    fn test_every_tool_has_entry() {
        let tools = tools(&["a", "b", "c"]);
        let connections = generate_connections(&tools, &matrix(), 1.0);
        assert_eq!(connections.len(), 3);
        assert!(connections.contains("c"));
        assert!(connections.neighbors("c").is_empty());
    }

    #[test]
    fn test_neighbor_order_follows_scan() {
        let tools = tools(&["a", "b", "c"]);
        let connections = generate_connections(&tools, &matrix(), 0.0);
        assert_eq!(connections.neighbors("a"), &["b", "c"]);
        assert_eq!(connections.neighbors("c"), &["a", "b"]);
    }

    #[test]
    fn test_take_moves_list_out() {
        let tools = tools(&["a", "b", "c"]);
        let mut connections = generate_connections(&tools, &matrix(), 0.7);
        assert_eq!(connections.take("a"), vec!["b".to_string()]);
        assert!(connections.neighbors("a").is_empty());
        assert!(connections.take("zzz").is_empty());
    }

    #[test]
    fn test_recomputed_score_agrees_with_matrix_at_boundary() {
        // Weighted score lands one ulp below 0.5
        let records = vec![
            Record::new()
                .with(columns::PRIMARY_FUNCTION, "water risk")
                .with(columns::DATA_SOURCES, "x")
                .with(columns::TARGET_USER, "u1, u2, u3, u4")
                .with(columns::ENVIRONMENT_TYPE, "e1"),
            Record::new()
                .with(columns::PRIMARY_FUNCTION, "water risk")
                .with(columns::DATA_SOURCES, "y")
                .with(columns::TARGET_USER, "u1, u2, u3, u5")
                .with(columns::ENVIRONMENT_TYPE, "e1, e2, e3, e4"),
        ];
        let weights = FeatureWeights::default();
        let tools = vec![
            Tool::new("a", records[0].clone()),
            Tool::new("b", records[1].clone()),
        ];

        let matrix = build_distance_matrix(&records, &weights);
        let connections = generate_connections(&tools, &matrix, 0.5);

        let score = similarity(&records[0], &records[1], &weights);
        assert_eq!(
            meets_threshold(to_distance(score), 0.5),
            connections.is_connected("a", "b")
        );
        assert!(connections.is_connected("a", "b"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one matrix row per tool")]
    fn test_length_mismatch_is_rejected() {
        generate_connections(&tools(&["a", "b"]), &matrix(), 0.5);
    }
}
