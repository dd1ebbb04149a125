//! Sequential threshold clustering.
//!
//! Points are visited once in traversal order. Each point joins the first
//! existing cluster (ascending label) whose distance is within the threshold,
//! otherwise it opens a new cluster. Earlier decisions are never revisited,
//! so the partition depends on the traversal order.

use std::borrow::Cow;

use threshclust_core::{
    invert_permutation, ClusteringConfig, Error, Labeling, PointSet, Result, TraversalOrder,
};

use crate::distance::{ClusterView, DistanceMetric, StatisticalDistance};

/// Threshold clustering engine.
pub struct ThresholdClustering<M = StatisticalDistance> {
    config: ClusteringConfig,
    metric: M,
}

/// Reusable buffers for [`ThresholdClustering::cluster_with_state`].
///
/// Nothing in the state carries over between passes; it only saves
/// allocations when the same engine is run repeatedly.
#[derive(Debug, Default)]
pub struct ThresholdState {
    working_labels: Vec<u32>,
    members: Vec<Vec<usize>>,
    num_clusters: usize,
}

impl ThresholdState {
    fn reset(&mut self, n: usize) {
        self.working_labels.clear();
        self.working_labels.reserve(n);
        for cluster in &mut self.members[..self.num_clusters] {
            cluster.clear();
        }
        self.num_clusters = 0;
    }

    /// Opens cluster `num_clusters + 1` with `index` as its only member.
    fn open_cluster(&mut self, index: usize) -> u32 {
        let slot = self.num_clusters;
        if self.members.len() <= slot {
            self.members.push(Vec::new());
        }
        self.members[slot].push(index);
        self.num_clusters += 1;
        next_label(slot)
    }
}

impl ThresholdClustering<StatisticalDistance> {
    /// Creates an engine using the statistical distance.
    #[must_use]
    pub fn new(config: ClusteringConfig) -> Self {
        Self {
            config,
            metric: StatisticalDistance,
        }
    }
}

impl<M: DistanceMetric> ThresholdClustering<M> {
    /// Creates an engine with a custom distance metric.
    #[must_use]
    pub fn with_metric(config: ClusteringConfig, metric: M) -> Self {
        Self { config, metric }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Returns the distance metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Clusters `points`, returning one label per point in original order.
    ///
    /// # Errors
    /// Returns an error if the configured threshold is negative or not finite.
    pub fn cluster(&self, points: &PointSet) -> Result<Labeling> {
        let mut state = ThresholdState::default();
        self.cluster_with_state(points, &mut state)
    }

    /// Same as [`cluster`](Self::cluster), reusing `state` buffers.
    ///
    /// # Errors
    /// Returns an error if the configured threshold is negative or not finite.
    pub fn cluster_with_state(
        &self,
        points: &PointSet,
        state: &mut ThresholdState,
    ) -> Result<Labeling> {
        self.config.validate()?;
        if points.is_empty() {
            return Err(Error::EmptyPointSet);
        }
        let threshold = self.config.threshold;
        let n = points.len();

        let perm = self.config.order.permutation(n);
        let working: Cow<'_, PointSet> = match self.config.order {
            TraversalOrder::Forward => Cow::Borrowed(points),
            _ => Cow::Owned(points.permuted(&perm)),
        };

        state.reset(n);
        let first = state.open_cluster(0);
        state.working_labels.push(first);

        for index in 1..n {
            let candidate = working.point(index);
            let accepted = (0..state.num_clusters).find(|&slot| {
                let cluster = ClusterView::new(&working, &state.members[slot]);
                let distance = self.metric.distance(candidate, &cluster);
                log::trace!(
                    "point {index}: distance {distance:.6} to cluster {}",
                    slot + 1
                );
                distance.abs() <= threshold
            });

            let label = match accepted {
                Some(slot) => {
                    state.members[slot].push(index);
                    next_label(slot)
                }
                None => state.open_cluster(index),
            };
            state.working_labels.push(label);
        }

        let labeling = Labeling::reindexed(&state.working_labels, &invert_permutation(&perm));
        log::debug!(
            "{} metric, threshold {threshold}, order {}: {n} points -> {} clusters",
            self.metric.name(),
            self.config.order,
            labeling.num_clusters()
        );
        Ok(labeling)
    }
}

/// Clusters `points` with the statistical distance.
///
/// # Errors
/// Returns an error if `threshold` is negative or not finite.
pub fn cluster(points: &PointSet, threshold: f64, order: TraversalOrder) -> Result<Labeling> {
    let config = ClusteringConfig::new()
        .with_threshold(threshold)
        .with_order(order);
    ThresholdClustering::new(config).cluster(points)
}

fn next_label(slot: usize) -> u32 {
    u32::try_from(slot + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::EuclideanDistance;

    fn scenario() -> PointSet {
        PointSet::from_rows(&[[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [10.0, 10.0, 10.0]]).unwrap()
    }

    #[test]
    fn test_forward_scenario() {
        let labeling = cluster(&scenario(), 1.0, TraversalOrder::Forward).unwrap();
        assert_eq!(labeling.labels(), &[1, 1, 2]);
    }

    #[test]
    fn test_single_point() {
        let points = PointSet::from_rows(&[[5.0, 5.0]]).unwrap();
        let labeling = cluster(&points, 0.0, TraversalOrder::Reverse).unwrap();
        assert_eq!(labeling.labels(), &[1]);
    }

    #[test]
    fn test_empty_point_set_rejected() {
        let empty = scenario().permuted(&[]);
        for order in [TraversalOrder::Forward, TraversalOrder::seeded(1)] {
            assert_eq!(cluster(&empty, 1.0, order), Err(Error::EmptyPointSet));
        }
    }

    #[test]
    fn test_invalid_threshold() {
        let err = cluster(&scenario(), -1.0, TraversalOrder::Forward).unwrap_err();
        assert!(matches!(err, Error::InvalidThreshold(_)));
    }

    #[test]
    fn test_state_reuse_matches_fresh_state() {
        let engine = ThresholdClustering::new(ClusteringConfig::new().with_threshold(1.0));
        let mut state = ThresholdState::default();

        let big = PointSet::from_rows(&[
            [0.0, 0.0],
            [50.0, 50.0],
            [100.0, 0.0],
            [0.5, 0.2],
            [49.0, 51.0],
        ])
        .unwrap();
        let _ = engine.cluster_with_state(&big, &mut state).unwrap();

        let reused = engine.cluster_with_state(&scenario(), &mut state).unwrap();
        assert_eq!(reused, engine.cluster(&scenario()).unwrap());
    }

    #[test]
    fn test_custom_metric() {
        // Squared Euclidean to the centroid: (0.1)^2 joins, (10,10,10) does not.
        let engine = ThresholdClustering::with_metric(
            ClusteringConfig::new().with_threshold(1.0),
            EuclideanDistance,
        );
        assert_eq!(engine.metric().name(), "euclidean");
        assert_eq!(engine.config().threshold, 1.0);
        let labeling = engine.cluster(&scenario()).unwrap();
        assert_eq!(labeling.labels(), &[1, 1, 2]);
    }
}
