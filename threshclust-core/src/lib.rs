//! threshclust-core: Core types for sequential threshold clustering.
//!
//! This crate provides the data model shared by the clustering engine,
//! the point sources and the result sinks: validated point sets,
//! traversal orders, labelings and per-cluster statistics.
//!

pub mod config;
pub mod error;
pub mod labeling;
pub mod order;
pub mod point;
pub mod statistics;

pub use config::ClusteringConfig;
pub use error::{Error, Result};
pub use labeling::Labeling;
pub use order::{invert_permutation, TraversalOrder};
pub use point::PointSet;
pub use statistics::{summarize, ClusterSummary, ClusteringStatistics};
