//! Clustering configuration.

use crate::error::{Error, Result};
use crate::order::TraversalOrder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a threshold clustering pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusteringConfig {
    /// Maximum normalized distance at which a point joins an existing cluster.
    pub threshold: f64,
    /// Order in which points are visited.
    pub order: TraversalOrder,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            order: TraversalOrder::Forward,
        }
    }
}

impl ClusteringConfig {
    /// Creates a new clustering configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the traversal order.
    #[must_use]
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Checks that the threshold is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`Error::InvalidThreshold`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_finite() && self.threshold >= 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidThreshold(self.threshold))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clustering_config() {
        let config = ClusteringConfig::new()
            .with_threshold(2.5)
            .with_order(TraversalOrder::Reverse);

        assert!((config.threshold - 2.5).abs() < f64::EPSILON);
        assert_eq!(config.order, TraversalOrder::Reverse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ClusteringConfig::new().with_threshold(0.0).validate().is_ok());
        for bad in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ClusteringConfig::new().with_threshold(bad).validate(),
                Err(Error::InvalidThreshold(_))
            ));
        }
    }
}
