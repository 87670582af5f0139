//! Agglomerative clustering into a binary dendrogram
//!
//! Starts with one leaf per record and repeatedly merges the closest pair of
//! active clusters until one root remains. The distance between two clusters
//! is the matrix entry between their representative records; it is not
//! recomputed as a true average or complete linkage after a merge. A merged
//! cluster is represented by its left child's representative, the child that
//! came first in scan order. Ties go to the first pair found in row-major
//! scan order over the active list.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::bail_invalid;
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::trace_time;

/// A dendrogram node: a leaf for one record or a merge of exactly two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClusterNode {
    Leaf {
        /// Row of the record in the distance matrix
        index: usize,
        label: String,
    },
    Internal {
        /// Synthetic name, `Cluster <k>`
        name: String,
        /// Distance at which the two children merged
        height: f64,
        /// Number of leaves below this node
        size: usize,
        children: Box<[ClusterNode; 2]>,
    },
}

impl ClusterNode {
    /// Merge height; zero for leaves
    pub fn height(&self) -> f64 {
        match self {
            ClusterNode::Leaf { .. } => 0.0,
            ClusterNode::Internal { height, .. } => *height,
        }
    }

    /// Leaf label or synthetic cluster name
    pub fn name(&self) -> &str {
        match self {
            ClusterNode::Leaf { label, .. } => label,
            ClusterNode::Internal { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ClusterNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ClusterNode::Leaf { .. } => 1,
            ClusterNode::Internal { size, .. } => *size,
        }
    }

    /// Number of internal nodes in this subtree
    pub fn merge_count(&self) -> usize {
        match self {
            ClusterNode::Leaf { .. } => 0,
            ClusterNode::Internal { children, .. } => {
                1 + children[0].merge_count() + children[1].merge_count()
            }
        }
    }

    /// Leaf labels, left to right
    pub fn leaf_labels(&self) -> Vec<&str> {
        let mut labels = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut labels);
        labels
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ClusterNode::Leaf { label, .. } => out.push(label),
            ClusterNode::Internal { children, .. } => {
                children[0].collect_leaves(out);
                children[1].collect_leaves(out);
            }
        }
    }
}

/// An active cluster during merging
struct Active {
    representative: usize,
    node: ClusterNode,
}

/// Closest active pair `(i, j, distance)` with `i < j`; first pair wins ties
fn closest_pair(active: &[Active], matrix: &DistanceMatrix) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..active.len() {
        for j in (i + 1)..active.len() {
            let distance = matrix.get(active[i].representative, active[j].representative);
            match best {
                Some((_, _, min)) if distance >= min || distance.is_nan() => {}
                _ => best = Some((i, j, distance)),
            }
        }
    }

    best
}

/// Build the dendrogram for a distance matrix
///
/// `labels[i]` names the record in row `i`. Returns `None` for an empty
/// matrix and a single leaf for one record. Produces exactly `n - 1` merges.
pub fn cluster<S: AsRef<str>>(matrix: &DistanceMatrix, labels: &[S]) -> Result<Option<ClusterNode>> {
    if labels.len() != matrix.len() {
        bail_invalid!(
            "cluster labels",
            format!("{} labels for {} records", labels.len(), matrix.len())
        );
    }

    let start = Instant::now();

    let mut active: Vec<Active> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| Active {
            representative: index,
            node: ClusterNode::Leaf {
                index,
                label: label.as_ref().to_string(),
            },
        })
        .collect();

    while active.len() > 1 {
        let Some((i, j, height)) = closest_pair(&active, matrix) else {
            break;
        };

        let name = format!("Cluster {}", active.len() - 1);

        // j > i, so removing j first keeps i valid
        let right = active.remove(j);
        let left = active.remove(i);
        let size = left.node.leaf_count() + right.node.leaf_count();

        active.push(Active {
            representative: left.representative,
            node: ClusterNode::Internal {
                name,
                height,
                size,
                children: Box::new([left.node, right.node]),
            },
        });
    }

    let root = active.pop().map(|a| a.node);

    debug!(
        leaves = matrix.len(),
        merges = root.as_ref().map_or(0, ClusterNode::merge_count),
        "cluster"
    );
    trace_time!(start, "cluster");

    Ok(root)
}
