//! Sampling-voting baseline solver.
//!
//! Each round samples a handful of uncovered points, tallies votes over
//! their candidate prefixes, and commits the candidate with the most votes.
//! Sampling keeps a round near O(n) while the vote distribution still steers
//! toward candidates covering large uncovered mass.

use super::{candidates_for, covers};
use crate::graph::AdjacencyLists;
use crate::matrix::Matrix;
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

/// Uncovered points sampled per voting round.
pub const DEFAULT_SAMPLES: usize = 10;

/// Compute a sampling-voting adjacency list for one center.
pub fn sampling_adjacency_list(
    center: u32,
    permutations: &Matrix<u32>,
    ranks: &Matrix<u32>,
    rng: &mut StdRng,
    samples: usize,
) -> Result<Vec<u32>> {
    let n = permutations.n();
    let mut adjlist = Vec::new();
    if n <= 1 {
        return Ok(adjlist);
    }

    let mut uncovered: Vec<u32> = (0..n as u32).filter(|&q| q != center).collect();
    let mut votes = vec![0u32; n];

    while !uncovered.is_empty() {
        votes.fill(0);
        for _ in 0..samples {
            let q = uncovered[rng.gen_range(0..uncovered.len())];
            for &s in candidates_for(center, q, permutations, ranks) {
                votes[s as usize] += 1;
            }
        }

        let mut best = 0;
        for s in 1..n {
            if votes[s] > votes[best] {
                best = s;
            }
        }
        if votes[best] == 0 {
            return Err(Error::CoverInfeasible { center }.into());
        }

        adjlist.push(best as u32);
        uncovered.retain(|&q| !covers(center, best as u32, q, ranks));
    }

    Ok(adjlist)
}

/// Sampling-voting adjacency lists for every vertex, in parallel, with
/// per-vertex deterministic random streams derived from `seed`.
pub fn sampling_adjacency_lists(
    permutations: &Matrix<u32>,
    ranks: &Matrix<u32>,
    seed: u64,
    samples: usize,
) -> Result<AdjacencyLists> {
    (0..permutations.n())
        .into_par_iter()
        .map(|v| {
            let mut rng = crate::graph::builder::vertex_rng(seed, v as u64);
            sampling_adjacency_list(v as u32, permutations, ranks, &mut rng, samples)
        })
        .collect()
}
