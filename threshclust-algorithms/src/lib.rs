//! threshclust-algorithms: Sequential threshold clustering.
//!
//! This crate provides:
//! - **Statistical distance** - spread-normalized squared distance between a
//!   point and a cluster (diagonal Mahalanobis approximation)
//! - **Threshold clustering** - first-fit, order-sensitive incremental pass
//! - **Processing helpers** - independent jobs and threshold sweeps in parallel
//!
#![warn(missing_docs)]

mod distance;
mod processing;
mod threshold;

pub use distance::{
    statistical_distance, ClusterSpread, ClusterView, DistanceMetric, EuclideanDistance,
    StatisticalDistance,
};
pub use processing::{cluster_many, threshold_sweep, ClusteringJob, SweepPoint};
pub use threshold::{cluster, ThresholdClustering, ThresholdState};

// Re-export core configuration types
pub use threshclust_core::{ClusteringConfig, Labeling, PointSet, TraversalOrder};
