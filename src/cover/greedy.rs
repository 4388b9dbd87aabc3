//! Greedy max-coverage baseline solver.
//!
//! The textbook ln(n)-approximation: repeatedly pick the candidate covering
//! the most still-uncovered points. Quadratic per vertex, so only suitable
//! as a quality baseline and correctness reference for the voting solver.

use super::candidates_for;
use crate::graph::AdjacencyLists;
use crate::matrix::Matrix;
use crate::{Error, Result};
use rayon::prelude::*;

/// Compute the greedy max-coverage adjacency list for one center.
pub fn greedy_adjacency_list(
    center: u32,
    permutations: &Matrix<u32>,
    ranks: &Matrix<u32>,
) -> Result<Vec<u32>> {
    let n = permutations.n();
    let v = center as usize;
    let mut adjlist = Vec::new();
    if n <= 1 {
        return Ok(adjlist);
    }

    let mut covered = vec![false; n];
    covered[v] = true;
    let mut remaining = n - 1;

    // members[s] = the points s would cover relative to the center
    let mut members: Vec<Vec<u32>> = vec![Vec::new(); n];
    for q in 0..n {
        if q == v {
            continue;
        }
        for &s in candidates_for(center, q as u32, permutations, ranks) {
            members[s as usize].push(q as u32);
        }
    }
    let mut uncovered_count: Vec<u32> = members.iter().map(|m| m.len() as u32).collect();

    while remaining > 0 {
        let mut best = 0;
        for s in 1..n {
            if uncovered_count[s] > uncovered_count[best] {
                best = s;
            }
        }
        let best_count = uncovered_count[best] as usize;
        if best_count == 0 {
            return Err(Error::CoverInfeasible { center }.into());
        }

        adjlist.push(best as u32);
        if best_count == remaining {
            break;
        }
        remaining -= best_count;
        for &q in &members[best] {
            if !covered[q as usize] {
                covered[q as usize] = true;
                for &s in candidates_for(center, q, permutations, ranks) {
                    uncovered_count[s as usize] -= 1;
                }
            }
        }
    }

    Ok(adjlist)
}

/// Greedy adjacency lists for every vertex, in parallel.
pub fn greedy_adjacency_lists(
    permutations: &Matrix<u32>,
    ranks: &Matrix<u32>,
) -> Result<AdjacencyLists> {
    (0..permutations.n())
        .into_par_iter()
        .map(|v| greedy_adjacency_list(v as u32, permutations, ranks))
        .collect()
}
