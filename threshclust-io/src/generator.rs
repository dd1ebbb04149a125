//! Random point generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use threshclust_core::{Error as CoreError, PointSet};

use crate::Result;

/// Generates `count` points of dimension `dim`, uniform in `[0, 1)`.
///
/// # Errors
/// Returns an error if `count` or `dim` is zero.
pub fn generate_uniform(count: usize, dim: usize, seed: Option<u64>) -> Result<PointSet> {
    generate_uniform_in(count, dim, 0.0, 1.0, seed)
}

/// Generates `count` points of dimension `dim`, uniform in `[low, high)`.
///
/// The generator is created for this call only; `None` seeds it from the OS.
///
/// # Errors
/// Returns an error if `count` or `dim` is zero or their product overflows,
/// or the bounds are not finite with `low < high`.
pub fn generate_uniform_in(
    count: usize,
    dim: usize,
    low: f64,
    high: f64,
    seed: Option<u64>,
) -> Result<PointSet> {
    let total = match count.checked_mul(dim) {
        Some(total) if total > 0 => total,
        _ => {
            return Err(CoreError::InvalidShape(format!(
                "cannot generate {count} points of dimension {dim}"
            ))
            .into())
        }
    };
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(CoreError::ConfigError(format!("invalid range [{low}, {high})")).into());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let coords = (0..total)
        .map(|_| rng.gen_range(low..high))
        .collect();
    Ok(PointSet::new(dim, coords)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_generate_uniform() {
        let points = generate_uniform(20, 3, Some(69)).unwrap();
        assert_eq!(points.len(), 20);
        assert_eq!(points.dim(), 3);
        assert!(points.as_flat().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = generate_uniform_in(10, 2, -5.0, 5.0, Some(7)).unwrap();
        let b = generate_uniform_in(10, 2, -5.0, 5.0, Some(7)).unwrap();
        assert_eq!(a, b);
        assert!(a.as_flat().iter().all(|&v| (-5.0..5.0).contains(&v)));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            generate_uniform(0, 3, None),
            Err(Error::CoreError(CoreError::InvalidShape(_)))
        ));
        assert!(matches!(
            generate_uniform(3, 0, None),
            Err(Error::CoreError(CoreError::InvalidShape(_)))
        ));
        assert!(matches!(
            generate_uniform(usize::MAX / 2, 3, Some(1)),
            Err(Error::CoreError(CoreError::InvalidShape(_)))
        ));
        assert!(generate_uniform_in(3, 3, 1.0, 1.0, None).is_err());
        assert!(generate_uniform_in(3, 3, 0.0, f64::INFINITY, None).is_err());
    }
}
