//! Distance between a candidate point and a cluster.
//!
//! The statistical distance normalizes the squared offset from the cluster
//! mean by the cluster's per-dimension population standard deviation:
//!
//! ```text
//! d(p, C) = delta · Σ⁻¹ · deltaᵗ,   delta = p - mean(C),   Σ = diag(std(C))
//! ```
//!
//! `Σ` is diagonal, so its inverse is the element-wise reciprocal and is never
//! materialized. When any component of `std(C)` is exactly zero, `Σ` is
//! singular and `Σ` itself is used in place of its inverse. For a
//! single-member cluster every component is zero, so the distance collapses to
//! zero and the cluster accepts any candidate.
#![allow(clippy::cast_precision_loss, clippy::float_cmp)]

use threshclust_core::PointSet;

/// A borrowed view of one cluster's members.
#[derive(Debug, Clone, Copy)]
pub struct ClusterView<'a> {
    points: &'a PointSet,
    members: &'a [usize],
}

impl<'a> ClusterView<'a> {
    /// Creates a view over `members`, indices into `points`.
    #[must_use]
    pub fn new(points: &'a PointSet, members: &'a [usize]) -> Self {
        Self { points, members }
    }

    /// Number of member points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the view has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Dimension of the member points.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.points.dim()
    }

    /// Iterates over the member coordinates.
    pub fn iter(&self) -> impl Iterator<Item = &'a [f64]> + 'a {
        let points = self.points;
        let members = self.members;
        members.iter().map(move |&idx| points.point(idx))
    }
}

/// Per-dimension mean and population standard deviation of a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSpread {
    /// Per-dimension arithmetic mean.
    pub mean: Vec<f64>,
    /// Per-dimension population standard deviation (divisor `n`).
    pub std: Vec<f64>,
}

impl ClusterSpread {
    /// Computes mean and spread of a non-empty cluster.
    ///
    /// An empty view yields zero-length vectors.
    #[must_use]
    pub fn from_members(cluster: &ClusterView<'_>) -> Self {
        if cluster.is_empty() {
            return Self {
                mean: Vec::new(),
                std: Vec::new(),
            };
        }

        let dim = cluster.dim();
        let n = cluster.len() as f64;

        let mut mean = vec![0.0; dim];
        for point in cluster.iter() {
            for (m, value) in mean.iter_mut().zip(point) {
                *m += value;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut var = vec![0.0; dim];
        for point in cluster.iter() {
            for ((v, value), m) in var.iter_mut().zip(point).zip(&mean) {
                *v += (value - m).powi(2);
            }
        }
        let std = var.into_iter().map(|v| (v / n).sqrt()).collect();

        Self { mean, std }
    }

    /// True when the diagonal spread matrix has no inverse.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.std.iter().any(|&s| s == 0.0)
    }

    /// Normalized squared distance from `candidate` to the cluster mean.
    ///
    /// A singular spread weights each squared offset by the spread itself
    /// instead of its reciprocal.
    #[must_use]
    pub fn distance(&self, candidate: &[f64]) -> f64 {
        let singular = self.is_singular();
        if singular {
            log::trace!("singular spread {:?}, using spread as weights", self.std);
        }

        candidate
            .iter()
            .zip(&self.mean)
            .zip(&self.std)
            .map(|((value, mean), &std)| {
                let delta = value - mean;
                let weight = if singular { std } else { std.recip() };
                delta * delta * weight
            })
            .sum()
    }
}

/// Computes the statistical distance between `candidate` and `cluster`.
#[must_use]
pub fn statistical_distance(candidate: &[f64], cluster: &ClusterView<'_>) -> f64 {
    ClusterSpread::from_members(cluster).distance(candidate)
}

/// Trait for point-to-cluster distance measures.
pub trait DistanceMetric: Send + Sync {
    /// Distance from `candidate` to the cluster described by `cluster`.
    fn distance(&self, candidate: &[f64], cluster: &ClusterView<'_>) -> f64;

    /// Returns the name of the metric.
    fn name(&self) -> &'static str;
}

/// Spread-normalized statistical distance (the default metric).
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalDistance;

impl DistanceMetric for StatisticalDistance {
    fn distance(&self, candidate: &[f64], cluster: &ClusterView<'_>) -> f64 {
        statistical_distance(candidate, cluster)
    }

    fn name(&self) -> &'static str {
        "statistical"
    }
}

/// Squared Euclidean distance to the cluster mean, without normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl DistanceMetric for EuclideanDistance {
    fn distance(&self, candidate: &[f64], cluster: &ClusterView<'_>) -> f64 {
        let spread = ClusterSpread::from_members(cluster);
        candidate
            .iter()
            .zip(&spread.mean)
            .map(|(value, mean)| (value - mean).powi(2))
            .sum()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn points(rows: &[[f64; 3]]) -> PointSet {
        PointSet::from_rows(rows).unwrap()
    }

    #[test]
    fn test_spread_population_std() {
        let set = points(&[[0.0, 0.0, 0.0], [2.0, 4.0, 6.0]]);
        let spread = ClusterSpread::from_members(&ClusterView::new(&set, &[0, 1]));
        assert_eq!(spread.mean, vec![1.0, 2.0, 3.0]);
        assert_eq!(spread.std, vec![1.0, 2.0, 3.0]);
        assert!(!spread.is_singular());
    }

    #[test]
    fn test_regular_distance_divides_by_spread() {
        let set = points(&[[0.0, 0.0, 0.0], [2.0, 4.0, 6.0], [3.0, 2.0, 3.0]]);
        let d = statistical_distance(set.point(2), &ClusterView::new(&set, &[0, 1]));
        // delta = (2, 0, 0), std = (1, 2, 3)
        assert_relative_eq!(d, 4.0);
    }

    #[test]
    fn test_single_member_distance_is_zero() {
        let set = points(&[[1.0, 2.0, 3.0], [1e6, -1e6, 42.0]]);
        let d = statistical_distance(set.point(1), &ClusterView::new(&set, &[0]));
        assert_relative_eq!(d, 0.0);
    }

    #[test]
    fn test_partially_singular_uses_spread_as_weights() {
        // std = (0.05, 0, 0): singular, so weights are (0.05, 0, 0).
        let set = points(&[[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [10.0, 10.0, 10.0]]);
        let cluster = ClusterView::new(&set, &[0, 1]);
        let spread = ClusterSpread::from_members(&cluster);
        assert!(spread.is_singular());

        let d = statistical_distance(set.point(2), &cluster);
        assert_relative_eq!(d, 9.95 * 9.95 * 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_is_non_negative() {
        let set = points(&[
            [-3.0, 7.0, 1.0],
            [4.0, -2.0, 0.5],
            [0.0, 0.0, 9.0],
            [-8.0, -8.0, -8.0],
        ]);
        let cluster = ClusterView::new(&set, &[0, 1, 2]);
        assert!(statistical_distance(set.point(3), &cluster) >= 0.0);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(StatisticalDistance.name(), "statistical");
        assert_eq!(EuclideanDistance.name(), "euclidean");
    }

    #[test]
    fn test_euclidean_metric() {
        let set = points(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 3.0, 4.0]]);
        let d = EuclideanDistance.distance(set.point(2), &ClusterView::new(&set, &[0, 1]));
        assert_relative_eq!(d, 25.0);
    }
}
