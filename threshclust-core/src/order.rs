//! Traversal orders for the clustering pass.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which points are presented to the clustering pass.
///
/// Clustering is order-sensitive, so the order is an explicit parameter.
/// Results are always reported in the caller's original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TraversalOrder {
    /// Points in input order.
    #[default]
    Forward,
    /// Points in reverse input order.
    Reverse,
    /// Pseudo-random permutation. `None` draws a fresh seed from the OS,
    /// so the result is not reproducible.
    Shuffle { seed: Option<u64> },
}

impl TraversalOrder {
    /// Shuffle with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Shuffle { seed: Some(seed) }
    }

    /// True when repeated calls yield the same permutation.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Self::Shuffle { seed: None })
    }

    /// Builds the working-order permutation for `n` points.
    ///
    /// Entry `k` is the original index of the `k`-th point visited. Shuffling
    /// uses a generator owned by this call; no shared random state is touched.
    #[must_use]
    pub fn permutation(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        match *self {
            Self::Forward => {}
            Self::Reverse => order.reverse(),
            Self::Shuffle { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                order.shuffle(&mut rng);
            }
        }
        order
    }
}

/// Inverts a permutation: `inv[perm[k]] == k`.
///
/// # Panics
/// Panics if `perm` is not a permutation of `0..perm.len()`.
#[must_use]
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![usize::MAX; perm.len()];
    for (k, &original) in perm.iter().enumerate() {
        inv[original] = k;
    }
    debug_assert!(inv.iter().all(|&k| k != usize::MAX));
    inv
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Reverse => f.write_str("reverse"),
            Self::Shuffle { seed: None } => f.write_str("shuffle"),
            Self::Shuffle { seed: Some(seed) } => write!(f, "shuffle:{seed}"),
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = Error;

    /// Accepts `forward`, `reverse`, `shuffle` and `shuffle:<seed>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.split_once(':') {
            Some(("shuffle", seed)) => seed
                .trim()
                .parse::<u64>()
                .map(Self::seeded)
                .map_err(|_| Error::InvalidOrder(s.to_string())),
            Some(_) => Err(Error::InvalidOrder(s.to_string())),
            None => match lowered.as_str() {
                "forward" => Ok(Self::Forward),
                "reverse" => Ok(Self::Reverse),
                "shuffle" => Ok(Self::Shuffle { seed: None }),
                _ => Err(Error::InvalidOrder(s.to_string())),
            },
        }
    }
}
