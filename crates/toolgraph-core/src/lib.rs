//! Toolgraph Core Library
//!
//! Similarity, clustering, and classification engine for a catalog of
//! nature-related tools. Records are compared with a weighted Jaccard metric,
//! linked when similar enough, clustered into a dendrogram, and filed under a
//! single keyword-derived category.

pub mod catalog;
pub mod classify;
pub mod cluster;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod id;
pub mod logging;
pub mod matrix;
pub mod pipeline;
pub mod record;
pub mod similarity;
pub mod text;
