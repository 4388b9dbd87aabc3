//! Greedy first-improvement walk and the navigability probe.
//!
//! The walk is the downstream query primitive and the correctness check for
//! constructed graphs: a graph is navigable iff, for every source and every
//! dataset target, the walk terminates at the target.

use crate::graph::AdjacencyLists;
use crate::points::PointSet;
use crate::distance::squared_euclidean;
use rayon::prelude::*;

/// Reusable per-walk state, so batch callers avoid reallocating the visited
/// set for every query.
pub struct WalkScratch {
    visited: Vec<bool>,
}

impl WalkScratch {
    /// Allocate scratch for graphs with `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            visited: vec![false; num_vertices],
        }
    }

    fn reset(&mut self) {
        self.visited.fill(false);
    }
}

/// Greedy first-improvement walk from `source` toward `query`.
///
/// At each vertex the out-neighbors are scanned in insertion order; the walk
/// moves to the first neighbor strictly closer to the query and rescans from
/// there. A neighbor at distance zero is returned immediately. The walk
/// stops at a local minimum, which on a navigable graph is the nearest
/// dataset point to the query.
///
/// Returns the terminal vertex and the number of distance computations.
pub fn greedy_walk(
    adjlists: &AdjacencyLists,
    points: &PointSet,
    source: u32,
    query: &[f32],
) -> (u32, usize) {
    let mut scratch = WalkScratch::new(points.len());
    greedy_walk_with_scratch(adjlists, points, source, query, &mut scratch)
}

/// [`greedy_walk`] with caller-provided scratch space.
pub fn greedy_walk_with_scratch(
    adjlists: &AdjacencyLists,
    points: &PointSet,
    source: u32,
    query: &[f32],
    scratch: &mut WalkScratch,
) -> (u32, usize) {
    scratch.reset();
    let visited = &mut scratch.visited;

    let mut current = source;
    let mut current_dist = squared_euclidean(points.point(source as usize), query);
    let mut dist_comps = 1usize;

    while !visited[current as usize] {
        visited[current as usize] = true;
        for &neighbor in &adjlists[current as usize] {
            if visited[neighbor as usize] {
                continue;
            }
            let dist = squared_euclidean(points.point(neighbor as usize), query);
            dist_comps += 1;
            if dist < current_dist {
                if dist == 0.0 {
                    return (neighbor, dist_comps);
                }
                current = neighbor;
                current_dist = dist;
                break; // rescan from the new vertex
            }
        }
    }

    (current, dist_comps)
}

/// A (source, target) pair on which the greedy walk missed its target.
#[derive(Debug, Clone, Copy)]
pub struct WalkFailure {
    /// Walk start vertex
    pub source: u32,
    /// Dataset point used as the query
    pub target: u32,
    /// Vertex the walk actually stopped at
    pub terminal: u32,
}

/// Probe every (source, target) pair; an empty result means the graph is
/// navigable. O(n²) walks, intended for tests and offline verification.
pub fn check_navigability(adjlists: &AdjacencyLists, points: &PointSet) -> Vec<WalkFailure> {
    let n = points.len();
    (0..n as u32)
        .into_par_iter()
        .map_init(
            || WalkScratch::new(n),
            |scratch, source| {
                let mut failures = Vec::new();
                for target in 0..n as u32 {
                    let (terminal, _) = greedy_walk_with_scratch(
                        adjlists,
                        points,
                        source,
                        points.point(target as usize),
                        scratch,
                    );
                    if terminal != target {
                        failures.push(WalkFailure {
                            source,
                            target,
                            terminal,
                        });
                    }
                }
                failures
            },
        )
        .flatten_iter()
        .collect()
}
