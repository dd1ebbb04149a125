//! Cluster labelings.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One 1-based cluster label per input point, in original point order.
///
/// Labels produced by the clustering engine form the contiguous range
/// `1..=K`. The labeling is the only record of cluster membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Labeling {
    labels: Vec<u32>,
}

impl Labeling {
    /// Wraps a raw label vector.
    #[must_use]
    pub fn new(labels: Vec<u32>) -> Self {
        Self { labels }
    }

    /// Restores working-order labels to original order.
    ///
    /// `inverse` is the inverse of the traversal permutation, so point `i`
    /// was visited at working position `inverse[i]`.
    ///
    /// # Panics
    /// Panics if `inverse` references a position outside `working`.
    #[must_use]
    pub fn reindexed(working: &[u32], inverse: &[usize]) -> Self {
        Self {
            labels: inverse.iter().map(|&k| working[k]).collect(),
        }
    }

    /// Returns the labels as a slice.
    #[must_use]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Consumes the labeling, returning the raw labels.
    #[must_use]
    pub fn into_inner(self) -> Vec<u32> {
        self.labels
    }

    /// Returns the number of labeled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no point is labeled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label of point `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.labels.get(index).copied()
    }

    /// Number of clusters K (the largest label).
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.labels.iter().copied().max().unwrap_or(0) as usize
    }

    /// Indices of the points carrying `label`, ascending.
    #[must_use]
    pub fn members(&self, label: u32) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Cluster sizes; entry `L - 1` is the size of label `L`.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters()];
        for &label in &self.labels {
            if label > 0 {
                sizes[label as usize - 1] += 1;
            }
        }
        sizes
    }

    /// True when the label values are exactly `{1..=K}`.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        !self.labels.is_empty()
            && !self.labels.contains(&0)
            && self.cluster_sizes().iter().all(|&size| size > 0)
    }

    /// True when both labelings group the points identically, ignoring the
    /// label numbers themselves.
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        if self.labels.len() != other.labels.len() {
            return false;
        }
        let mut forward: HashMap<u32, u32> = HashMap::new();
        let mut backward: HashMap<u32, u32> = HashMap::new();
        self.labels.iter().zip(&other.labels).all(|(&a, &b)| {
            *forward.entry(a).or_insert(b) == b && *backward.entry(b).or_insert(a) == a
        })
    }
}

impl From<Vec<u32>> for Labeling {
    fn from(labels: Vec<u32>) -> Self {
        Self::new(labels)
    }
}
