//! Set-cover formulation of navigability and the per-vertex cover solvers.
//!
//! Fix a vertex i, the *center*. A candidate s covers a point p relative to
//! i iff s is strictly closer to p than i is, i.e. `R[p][s] < R[p][i]` in
//! the tie-collapsed rank matrix. A collection of candidates covering every
//! p ≠ i is exactly an adjacency list for i under which the greedy walk
//! always has an improving step toward i; picking a minimum such collection
//! for every vertex yields a minimum navigable graph.
//!
//! Three solvers share this formulation:
//!
//! - [`voting`]: the production solver, committing a candidate once it
//!   accumulates ceil(log2 n) votes from uncovered points,
//! - [`greedy`]: classic max-coverage greedy, the quality baseline,
//! - [`sampling`]: voting over small uncovered samples, the speed baseline.

pub mod greedy;
pub mod sampling;
pub mod voting;

use crate::matrix::Matrix;

/// True if candidate `s` covers point `p` relative to `center`.
#[inline]
pub fn covers(center: u32, s: u32, p: u32, ranks: &Matrix<u32>) -> bool {
    ranks.at(p as usize, s as usize) < ranks.at(p as usize, center as usize)
}

/// The candidates that cover `p` relative to `center`: the prefix of p's
/// distance ordering that strictly outranks the center, closest first.
#[inline]
pub fn candidates_for<'a>(
    center: u32,
    p: u32,
    permutations: &'a Matrix<u32>,
    ranks: &Matrix<u32>,
) -> &'a [u32] {
    let boundary = ranks.at(p as usize, center as usize) as usize;
    &permutations.row(p as usize)[..boundary]
}

/// ceil(log2 n); 0 for n <= 1.
#[inline]
pub fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}
