//! Per-vertex approximate minimum cover by threshold voting.
//!
//! Uncovered points vote for the candidates that would cover them, scanning
//! their candidate prefix in rank order so votes concentrate on candidates
//! close to many uncovered points. A candidate is committed to the adjacency
//! list the moment an arriving point would become its ceil(log2 n)-th voter;
//! the commit retracts all of the candidate's voters from every other
//! candidate they were voting for, since they are now covered. Each commit
//! covers logn points at once, giving the expected O(log n)-factor
//! approximation of randomized set cover.

use super::{candidates_for, ceil_log2, covers};
use crate::matrix::Matrix;
use crate::{Error, Result};

/// Remove one occurrence of `x` from a voter list, order-insensitively.
#[inline]
fn retract(voters: &mut Vec<u32>, x: u32) {
    if let Some(pos) = voters.iter().position(|&v| v == x) {
        voters.swap_remove(pos);
    }
}

/// Compute an approximate minimum cover for `center`, appending the chosen
/// candidates to `adjlist`.
///
/// `uncovered` is consumed back-to-front; callers shuffle it beforehand so
/// the vote order is random. `adjlist` may arrive pre-seeded (the budgeted
/// driver seeds random shortcut edges); seeded edges participate in the
/// already-covered check but are never duplicated, because a candidate in
/// an uncovered point's prefix cannot already be in the list.
///
/// Points whose candidate scan ends without any commit are parked; any of
/// them still uncovered once the queue drains are covered directly by their
/// own rank-0 candidate (the point itself, which by definition outranks the
/// center in its own ordering). An empty candidate prefix means the rank
/// matrix is degenerate and surfaces as [`Error::CoverInfeasible`].
pub fn minimum_adjacency_list(
    n: usize,
    center: u32,
    uncovered: &mut Vec<u32>,
    adjlist: &mut Vec<u32>,
    permutations: &Matrix<u32>,
    ranks: &Matrix<u32>,
) -> Result<()> {
    let threshold = ceil_log2(n).saturating_sub(1);
    let mut voters: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut parked: Vec<u32> = Vec::new();

    while let Some(p) = uncovered.pop() {
        if adjlist.iter().any(|&s| covers(center, s, p, ranks)) {
            continue;
        }

        let prefix = candidates_for(center, p, permutations, ranks);
        if prefix.is_empty() {
            return Err(Error::CoverInfeasible { center }.into());
        }

        let mut committed = false;
        for (j, &s) in prefix.iter().enumerate() {
            if voters[s as usize].len() >= threshold {
                adjlist.push(s);
                // p's earlier votes are void now that p is covered
                for &earlier in &prefix[..j] {
                    retract(&mut voters[earlier as usize], p);
                }
                // the committed candidate's voters are covered too;
                // withdraw them everywhere else
                let covered_now = std::mem::take(&mut voters[s as usize]);
                for &v in &covered_now {
                    for &other in candidates_for(center, v, permutations, ranks) {
                        if other != s {
                            retract(&mut voters[other as usize], v);
                        }
                    }
                }
                committed = true;
                break;
            }
            voters[s as usize].push(p);
        }

        if !committed {
            parked.push(p);
        }
    }

    // Parked points may have been covered by later commits; force-cover the
    // rest with themselves (rank 0 in their own ordering beats the center).
    for p in parked {
        if !adjlist.iter().any(|&s| covers(center, s, p, ranks)) {
            adjlist.push(p);
        }
    }

    Ok(())
}
