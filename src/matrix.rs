//! Flat row-major matrices and the metric preprocessing pipeline.
//!
//! Construction reads the all-pairs metric structure through three n×n
//! matrices, each built once in parallel and read-only afterwards:
//!
//! - the distance matrix `D` (symmetric, zero diagonal),
//! - the permutation matrix `P`, where row i sorts all indices by distance
//!   from point i,
//! - the rank matrix `R`, the per-row inverse of `P` with equal-distance
//!   ranks collapsed onto the first rank of their tie class.
//!
//! Tie collapsing makes `R[p][s] < R[p][i]` equivalent to "s is strictly
//! closer to p than i is" even when distinct points share a distance, which
//! the cover solvers rely on.

use crate::points::PointSet;
use crate::{distance, Result};
use rayon::prelude::*;

/// An n×n matrix stored as one flat row-major buffer.
///
/// Rows are exposed as slices rather than through nested indexing; the inner
/// construction loops scan row prefixes and want contiguous memory.
pub struct Matrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    /// Allocate an n×n matrix with every cell set to `fill`.
    pub fn new(n: usize, fill: T) -> Self {
        Self {
            n,
            data: vec![fill; n * n],
        }
    }

    /// Side length of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row `i` as a slice of length n.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Cell (i, j).
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> T {
        self.data[i * self.n + j]
    }
}

/// Raw pointer wrapper so the distance pass can mirror cells across rows.
///
/// Safety rests on the write discipline in [`distance_matrix`]: row i writes
/// D[i][j] and D[j][i] only for j > i, so every cell has exactly one writer.
#[derive(Clone, Copy)]
struct SendPtr(*mut f32);

unsafe impl Send for SendPtr {}
unsafe impl Sync for SendPtr {}

/// Build the symmetric all-pairs squared-distance matrix in parallel.
///
/// Each unordered pair is computed once; the cell below the diagonal is
/// owned by the smaller row index.
pub fn distance_matrix(points: &PointSet) -> Matrix<f32> {
    let n = points.len();
    let mut matrix = Matrix::new(n, 0.0f32);
    if n == 0 {
        return matrix;
    }
    let ptr = SendPtr(matrix.data.as_mut_ptr());
    (0..n).into_par_iter().for_each(|i| {
        let data = ptr;
        for j in i + 1..n {
            let d = distance::squared_euclidean(points.point(i), points.point(j));
            unsafe {
                *data.0.add(i * n + j) = d;
                *data.0.add(j * n + i) = d;
            }
        }
    });
    matrix
}

/// Build the permutation matrix: row i is the index order that sorts row i
/// of the distance matrix ascendingly.
///
/// Ties are broken arbitrarily; the rank matrix collapses them, so the
/// exact order within a tie class is immaterial downstream.
pub fn permutation_matrix(distances: &Matrix<f32>) -> Matrix<u32> {
    let n = distances.n();
    let mut matrix = Matrix::new(n, 0u32);
    if n == 0 {
        return matrix;
    }
    matrix
        .data
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, row)| {
            let dists = distances.row(i);
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = j as u32;
            }
            row.sort_unstable_by(|&a, &b| dists[a as usize].total_cmp(&dists[b as usize]));
        });
    matrix
}

/// Build the rank matrix: `R[i][j]` is the position of j in row i of the
/// permutation matrix, with equal-distance entries collapsed onto the first
/// rank of their tie class.
///
/// The collapse pass walks the row in sorted order (indexing distances
/// through the permutation), so runs of equal distances all inherit the rank
/// of the run's first element.
pub fn rank_matrix(distances: &Matrix<f32>, permutations: &Matrix<u32>) -> Matrix<u32> {
    let n = distances.n();
    let mut matrix = Matrix::new(n, 0u32);
    if n == 0 {
        return matrix;
    }
    matrix
        .data
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, row)| {
            let dists = distances.row(i);
            let perm = permutations.row(i);
            for (k, &j) in perm.iter().enumerate() {
                row[j as usize] = k as u32;
            }
            for k in 1..n {
                if dists[perm[k] as usize] == dists[perm[k - 1] as usize] {
                    row[perm[k] as usize] = row[perm[k - 1] as usize];
                }
            }
        });
    matrix
}

/// Build all three metric matrices for a point set.
///
/// This is the preprocessing step shared by every construction path; the
/// matrices are read-only for the rest of the build.
pub fn preprocess(points: &PointSet) -> Result<(Matrix<f32>, Matrix<u32>, Matrix<u32>)> {
    let distances = distance_matrix(points);
    let permutations = permutation_matrix(&distances);
    let ranks = rank_matrix(&distances, &permutations);
    Ok((distances, permutations, ranks))
}
