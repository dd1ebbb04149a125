//! Point set storage.
//!
//! A `PointSet` keeps all coordinates in one row-major buffer, so a point is a
//! `dim`-long slice. Shape and finiteness are validated once at construction;
//! downstream code indexes without re-checking.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered, non-empty set of fixed-dimension points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPointSet"))]
pub struct PointSet {
    dim: usize,
    coords: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through [`PointSet::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPointSet {
    dim: usize,
    coords: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPointSet> for PointSet {
    type Error = Error;

    fn try_from(raw: RawPointSet) -> Result<Self> {
        Self::new(raw.dim, raw.coords)
    }
}

impl PointSet {
    /// Creates a point set from a flat row-major coordinate buffer.
    ///
    /// # Errors
    /// Returns an error if the buffer is empty, `dim` is zero, the buffer
    /// length is not a multiple of `dim`, or a coordinate is not finite.
    pub fn new(dim: usize, coords: Vec<f64>) -> Result<Self> {
        if coords.is_empty() {
            return Err(Error::EmptyPointSet);
        }
        if dim == 0 {
            return Err(Error::InvalidShape("dimension must be at least 1".into()));
        }
        if coords.len() % dim != 0 {
            return Err(Error::InvalidShape(format!(
                "{} coordinates do not split into points of dimension {dim}",
                coords.len()
            )));
        }
        check_finite(dim, &coords)?;
        Ok(Self { dim, coords })
    }

    /// Creates a point set from individual rows.
    ///
    /// The first row fixes the dimension.
    ///
    /// # Errors
    /// Returns an error for an empty row list, an empty first row, rows of
    /// differing length, or non-finite coordinates.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyPointSet)?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(Error::InvalidShape("dimension must be at least 1".into()));
        }

        let mut coords = Vec::with_capacity(rows.len() * dim);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    index,
                    expected: dim,
                    found: row.len(),
                });
            }
            coords.extend_from_slice(row);
        }
        check_finite(dim, &coords)?;
        Ok(Self { dim, coords })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim
    }

    /// Always false for a constructed set; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the dimension shared by all points.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the coordinates of point `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn point(&self, index: usize) -> &[f64] {
        let start = index * self.dim;
        &self.coords[start..start + self.dim]
    }

    /// Returns an iterator over the points in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + Clone + '_ {
        self.coords.chunks_exact(self.dim)
    }

    /// Returns the flat row-major coordinate buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.coords
    }

    /// Returns a new set whose `k`-th point is `self.point(order[k])`.
    ///
    /// # Panics
    /// Panics if `order` references an index outside the set.
    #[must_use]
    pub fn permuted(&self, order: &[usize]) -> Self {
        let mut coords = Vec::with_capacity(order.len() * self.dim);
        for &index in order {
            coords.extend_from_slice(self.point(index));
        }
        Self {
            dim: self.dim,
            coords,
        }
    }
}

fn check_finite(dim: usize, coords: &[f64]) -> Result<()> {
    match coords.iter().position(|value| !value.is_finite()) {
        Some(pos) => Err(Error::NonFiniteCoordinate {
            index: pos / dim,
            dim: pos % dim,
        }),
        None => Ok(()),
    }
}
