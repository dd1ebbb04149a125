//! Per-cluster statistics for summaries and reports.
#![allow(clippy::cast_precision_loss)]

use crate::error::{Error, Result};
use crate::labeling::Labeling;
use crate::point::PointSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one clustering result.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringStatistics {
    /// Number of labeled points.
    pub num_points: usize,
    /// Number of clusters formed.
    pub num_clusters: usize,
    /// Size of the largest cluster.
    pub largest_cluster: usize,
    /// Clusters holding exactly one point.
    pub singleton_clusters: usize,
    /// Mean number of points per cluster.
    pub mean_cluster_size: f64,
}

impl ClusteringStatistics {
    /// Computes statistics from a labeling.
    #[must_use]
    pub fn from_labeling(labeling: &Labeling) -> Self {
        let sizes = labeling.cluster_sizes();
        let num_clusters = sizes.len();
        Self {
            num_points: labeling.len(),
            num_clusters,
            largest_cluster: sizes.iter().copied().max().unwrap_or(0),
            singleton_clusters: sizes.iter().filter(|&&size| size == 1).count(),
            mean_cluster_size: if num_clusters == 0 {
                0.0
            } else {
                labeling.len() as f64 / num_clusters as f64
            },
        }
    }
}

/// Summary of a single cluster: size, centroid and spread.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterSummary {
    /// Cluster label (1-based).
    pub label: u32,
    /// Number of member points.
    pub size: usize,
    /// Per-dimension mean of the members.
    pub centroid: Vec<f64>,
    /// Per-dimension population standard deviation of the members.
    pub spread: Vec<f64>,
}

/// Summarizes every cluster of `labeling`, ascending by label.
///
/// # Errors
/// Returns [`Error::LengthMismatch`] if the labeling does not cover `points`.
pub fn summarize(points: &PointSet, labeling: &Labeling) -> Result<Vec<ClusterSummary>> {
    if points.len() != labeling.len() {
        return Err(Error::LengthMismatch {
            points: points.len(),
            labels: labeling.len(),
        });
    }

    let dim = points.dim();
    let num_clusters = labeling.num_clusters();
    let mut sums = vec![vec![0.0; dim]; num_clusters];
    let mut sizes = vec![0usize; num_clusters];

    for (point, &label) in points.iter().zip(labeling.labels()) {
        let Some(slot) = (label as usize).checked_sub(1) else {
            continue;
        };
        sizes[slot] += 1;
        for (sum, value) in sums[slot].iter_mut().zip(point) {
            *sum += value;
        }
    }

    let centroids: Vec<Vec<f64>> = sums
        .into_iter()
        .zip(&sizes)
        .map(|(sum, &size)| {
            let n = size.max(1) as f64;
            sum.into_iter().map(|s| s / n).collect()
        })
        .collect();

    let mut squares = vec![vec![0.0; dim]; num_clusters];
    for (point, &label) in points.iter().zip(labeling.labels()) {
        let Some(slot) = (label as usize).checked_sub(1) else {
            continue;
        };
        for ((sq, value), mean) in squares[slot].iter_mut().zip(point).zip(&centroids[slot]) {
            *sq += (value - mean).powi(2);
        }
    }

    Ok(centroids
        .into_iter()
        .zip(squares)
        .zip(sizes)
        .enumerate()
        .filter(|(_, (_, size))| *size > 0)
        .map(|(slot, ((centroid, sq), size))| ClusterSummary {
            label: u32::try_from(slot + 1).unwrap_or(u32::MAX),
            size,
            centroid,
            spread: sq.into_iter().map(|s| (s / size as f64).sqrt()).collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics() {
        let stats = ClusteringStatistics::from_labeling(&Labeling::new(vec![1, 1, 2, 3, 1]));
        assert_eq!(stats.num_points, 5);
        assert_eq!(stats.num_clusters, 3);
        assert_eq!(stats.largest_cluster, 3);
        assert_eq!(stats.singleton_clusters, 2);
        assert_relative_eq!(stats.mean_cluster_size, 5.0 / 3.0);
    }

    #[test]
    fn test_summarize() {
        let points =
            PointSet::from_rows(&[[0.0, 0.0], [2.0, 4.0], [10.0, 10.0]]).unwrap();
        let labeling = Labeling::new(vec![1, 1, 2]);
        let summary = summarize(&points, &labeling).unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].label, 1);
        assert_eq!(summary[0].size, 2);
        assert_relative_eq!(summary[0].centroid[0], 1.0);
        assert_relative_eq!(summary[0].centroid[1], 2.0);
        assert_relative_eq!(summary[0].spread[0], 1.0);
        assert_relative_eq!(summary[0].spread[1], 2.0);
        assert_eq!(summary[1].size, 1);
        assert_relative_eq!(summary[1].spread[0], 0.0);
    }

    #[test]
    fn test_summarize_length_mismatch() {
        let points = PointSet::from_rows(&[[0.0], [1.0]]).unwrap();
        let err = summarize(&points, &Labeling::new(vec![1])).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { points: 2, labels: 1 });
    }
}
