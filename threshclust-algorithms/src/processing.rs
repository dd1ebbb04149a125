//! High-level helpers that run independent clustering passes in parallel.
//!
//! A single pass is strictly sequential. Separate passes share no mutable
//! state (each shuffle owns its generator), so they fan out over rayon.

use rayon::prelude::*;
use threshclust_core::{ClusteringConfig, Labeling, PointSet, Result, TraversalOrder};

use crate::threshold::{ThresholdClustering, ThresholdState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One independent clustering call.
#[derive(Clone, Debug)]
pub struct ClusteringJob<'a> {
    /// Points to cluster.
    pub points: &'a PointSet,
    /// Threshold and traversal order for this call.
    pub config: ClusteringConfig,
}

impl<'a> ClusteringJob<'a> {
    /// Creates a job.
    #[must_use]
    pub fn new(points: &'a PointSet, config: ClusteringConfig) -> Self {
        Self { points, config }
    }
}

/// Number of clusters produced at one threshold of a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepPoint {
    /// Threshold used for the pass.
    pub threshold: f64,
    /// Number of clusters formed.
    pub num_clusters: usize,
}

/// Runs every job in parallel; results keep the job order.
#[must_use]
pub fn cluster_many(jobs: &[ClusteringJob<'_>]) -> Vec<Result<Labeling>> {
    jobs.par_iter()
        .map_init(ThresholdState::default, |state, job| {
            ThresholdClustering::new(job.config.clone()).cluster_with_state(job.points, state)
        })
        .collect()
}

/// Clusters `points` once per threshold and reports the cluster counts.
///
/// Results keep the order of `thresholds`.
///
/// # Errors
/// Returns the first error encountered, e.g. a negative threshold.
pub fn threshold_sweep(
    points: &PointSet,
    thresholds: &[f64],
    order: TraversalOrder,
) -> Result<Vec<SweepPoint>> {
    thresholds
        .par_iter()
        .map_init(ThresholdState::default, |state, &threshold| {
            let config = ClusteringConfig::new()
                .with_threshold(threshold)
                .with_order(order);
            let labeling = ThresholdClustering::new(config).cluster_with_state(points, state)?;
            Ok(SweepPoint {
                threshold,
                num_clusters: labeling.num_clusters(),
            })
        })
        .collect()
}
