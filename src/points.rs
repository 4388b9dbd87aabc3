//! Point sets: ordered collections of fixed-dimensional vectors.
//!
//! Coordinates are stored in one flat row-major buffer so the all-pairs
//! distance pass streams sequentially through memory. Points are identified
//! by their index in the set; ids are stable for the lifetime of the set.

use crate::distance::squared_euclidean;
use crate::{Error, Result};
use hashbrown::HashMap;

/// A borrowed view of one point: its stable id and coordinate slice.
///
/// Equality is id-based; two distinct points may share coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Point<'a> {
    /// Index of the point in its owning [`PointSet`]
    pub id: u32,
    /// Coordinate slice of length `dim()`
    pub coords: &'a [f32],
}

impl PartialEq for Point<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Point<'_> {}

/// An ordered, immutable collection of n points of uniform dimension.
pub struct PointSet {
    dim: usize,
    data: Vec<f32>,
}

impl PointSet {
    /// Create a point set from a flat row-major coordinate buffer.
    pub fn new(data: Vec<f32>, dim: usize) -> Result<Self> {
        if dim == 0 && !data.is_empty() {
            return Err(Error::Input("dimension must be nonzero".to_string()).into());
        }
        if dim != 0 && data.len() % dim != 0 {
            return Err(Error::Input(format!(
                "coordinate buffer length {} is not a multiple of dimension {}",
                data.len(),
                dim
            ))
            .into());
        }
        Ok(Self { dim, data })
    }

    /// Create a point set from per-point coordinate vectors.
    pub fn from_vecs(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = vectors.first() else {
            return Ok(Self { dim: 0, data: Vec::new() });
        };
        let dim = first.len();
        let mut data = Vec::with_capacity(vectors.len() * dim);
        for v in &vectors {
            if v.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: v.len(),
                }
                .into());
            }
            data.extend_from_slice(v);
        }
        Self::new(data, dim)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    /// True if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform dimension of the points.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinate slice of point `i`.
    #[inline]
    pub fn point(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Borrowed view of point `i` with its id.
    pub fn get(&self, i: usize) -> Point<'_> {
        Point {
            id: i as u32,
            coords: self.point(i),
        }
    }

    /// Squared-Euclidean distance between points `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f32 {
        squared_euclidean(self.point(i), self.point(j))
    }

    /// Flat row-major coordinate buffer.
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Remove exact coordinate duplicates, keeping the first occurrence.
    ///
    /// Returns the deduplicated set and, for each kept point, its id in the
    /// original set. Fully coincident points degenerate the rank matrix (a
    /// duplicate can never be strictly closer than its twin), so callers
    /// working with noisy data should dedup before construction.
    pub fn dedup(&self) -> (PointSet, Vec<u32>) {
        let n = self.len();
        let mut seen: HashMap<Vec<u32>, u32> = HashMap::with_capacity(n);
        let mut data = Vec::new();
        let mut kept = Vec::new();
        for i in 0..n {
            let coords = self.point(i);
            // Key on f32 bit patterns; -0.0 and 0.0 hash apart, so only
            // bitwise-identical points are merged.
            let key: Vec<u32> = coords.iter().map(|c| c.to_bits()).collect();
            if seen.insert(key, i as u32).is_none() {
                data.extend_from_slice(coords);
                kept.push(i as u32);
            }
        }
        (
            PointSet {
                dim: self.dim,
                data,
            },
            kept,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vecs() {
        let points =
            PointSet::from_vecs(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.dim(), 2);
        assert_eq!(points.point(1), &[1.0, 0.0]);
        assert_eq!(points.distance(1, 2), 2.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = PointSet::from_vecs(vec![vec![0.0, 0.0], vec![1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_id_equality() {
        let points = PointSet::from_vecs(vec![vec![1.0], vec![1.0]]).unwrap();
        assert_eq!(points.get(0), points.get(0));
        assert_ne!(points.get(0), points.get(1));
    }

    #[test]
    fn test_empty() {
        let points = PointSet::from_vecs(vec![]).unwrap();
        assert!(points.is_empty());
        assert_eq!(points.len(), 0);
    }

    #[test]
    fn test_dedup() {
        let points = PointSet::from_vecs(vec![
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0],
        ])
        .unwrap();
        let (unique, kept) = points.dedup();
        assert_eq!(unique.len(), 2);
        assert_eq!(kept, vec![0, 2]);
        assert_eq!(unique.point(1), &[1.0, 0.0]);
    }
}
