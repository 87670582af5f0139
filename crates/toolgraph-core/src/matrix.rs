//! Pairwise distance matrix over catalog records

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::bail_invalid;
use crate::error::Result;
use crate::record::Record;
use crate::similarity::{similarity, FeatureWeights};
use crate::trace_time;

/// Tolerance for the symmetry check on caller-supplied matrices
const SYMMETRY_EPSILON: f64 = 1e-9;

/// Symmetric `n×n` distance matrix with a zero diagonal
///
/// Stored row-major in a flat buffer. Built once per `(records, weights)`
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// An `n×n` matrix of zeros
    pub fn zeros(n: usize) -> Self {
        DistanceMatrix {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Build from nested rows, checking shape, symmetry, and the diagonal
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                bail_invalid!(
                    "distance matrix",
                    format!("row {} has {} columns, expected {}", i, row.len(), n)
                );
            }
            values.extend_from_slice(row);
        }

        let matrix = DistanceMatrix { n, values };
        for i in 0..n {
            if matrix.get(i, i) != 0.0 {
                bail_invalid!(
                    "distance matrix",
                    format!("diagonal entry ({}, {}) is {}", i, i, matrix.get(i, i))
                );
            }
            for j in (i + 1)..n {
                if (matrix.get(i, j) - matrix.get(j, i)).abs() > SYMMETRY_EPSILON {
                    bail_invalid!(
                        "distance matrix",
                        format!("entries ({}, {}) and ({}, {}) differ", i, j, j, i)
                    );
                }
            }
        }

        Ok(matrix)
    }

    /// Number of records covered
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between records `i` and `j`
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index out of range");
        self.values[i * self.n + j]
    }

    fn set_pair(&mut self, i: usize, j: usize, distance: f64) {
        self.values[i * self.n + j] = distance;
        self.values[j * self.n + i] = distance;
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Distance stored in the matrix for a pair with the given similarity
pub fn to_distance(similarity: f64) -> f64 {
    1.0 - similarity
}

/// Compute `1 - similarity` for every unordered pair of records
///
/// O(n²) similarity evaluations; the diagonal is left at zero.
pub fn build_distance_matrix(records: &[Record], weights: &FeatureWeights) -> DistanceMatrix {
    let start = Instant::now();
    let n = records.len();
    let mut matrix = DistanceMatrix::zeros(n);

    for i in 0..n {
        for j in (i + 1)..n {
            let distance = to_distance(similarity(&records[i], &records[j], weights));
            matrix.set_pair(i, j, distance);
        }
    }

    debug!(records = n, pairs = n * n.saturating_sub(1) / 2, "distance_matrix");
    trace_time!(start, "build_distance_matrix");

    matrix
}
