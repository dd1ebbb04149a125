//! Machine-readable clustering report.

use serde::{Deserialize, Serialize};
use threshclust_core::{
    summarize, ClusterSummary, ClusteringConfig, ClusteringStatistics, Labeling, PointSet,
};

use crate::Result;

/// Everything a presentation layer needs to show one clustering result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringReport {
    /// Threshold and order used.
    pub config: ClusteringConfig,
    /// Aggregate statistics.
    pub statistics: ClusteringStatistics,
    /// One label per point, in input order.
    pub labels: Labeling,
    /// Per-cluster centroid and spread, ascending by label.
    pub clusters: Vec<ClusterSummary>,
}

impl ClusteringReport {
    /// Builds a report for `labeling` over `points`.
    ///
    /// # Errors
    /// Returns an error if the labeling does not cover `points`.
    pub fn new(config: ClusteringConfig, points: &PointSet, labeling: Labeling) -> Result<Self> {
        let clusters = summarize(points, &labeling)?;
        Ok(Self {
            config,
            statistics: ClusteringStatistics::from_labeling(&labeling),
            labels: labeling,
            clusters,
        })
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
