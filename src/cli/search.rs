//! Query command: greedy walks over a saved graph.
//!
//! Walks every query from a fixed source vertex and reports recall@k
//! against ground truth (brute-forced when no file is given), the average
//! number of distance computations, and query throughput.

use clap::Args;
use console::style;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::graph::walk::{greedy_walk_with_scratch, WalkScratch};
use crate::points::PointSet;
use crate::{io, Error};

#[derive(Args)]
pub struct SearchArgs {
    /// Path to the graph file
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Path to the base .fbin point file the graph was built from
    #[arg(short, long)]
    pub base: PathBuf,

    /// Path to the query .fbin file (defaults to the base file)
    #[arg(short, long)]
    pub query: Option<PathBuf>,

    /// Path to a ground-truth file (brute-forced when omitted)
    #[arg(short = 't', long)]
    pub ground_truth: Option<PathBuf>,

    /// Count a query as correct if the walk ends at any of its k nearest
    #[arg(short, long, default_value = "1")]
    pub k: usize,

    /// Source vertex every walk starts from
    #[arg(long, default_value = "0")]
    pub source: u32,
}

/// Brute-force the k nearest dataset ids for each query.
fn compute_ground_truth(points: &PointSet, queries: &PointSet, k: usize) -> Vec<Vec<u32>> {
    (0..queries.len())
        .into_par_iter()
        .map(|q| {
            let query = queries.point(q);
            let mut order: Vec<u32> = (0..points.len() as u32).collect();
            order.sort_unstable_by(|&a, &b| {
                let da = crate::distance::squared_euclidean(points.point(a as usize), query);
                let db = crate::distance::squared_euclidean(points.point(b as usize), query);
                da.total_cmp(&db)
            });
            order.truncate(k);
            order
        })
        .collect()
}

pub fn run(args: SearchArgs, cli: &crate::Cli) -> crate::Result<()> {
    let adjlists = io::read_graph(&args.graph)?;
    if cli.verbose {
        println!("Loaded graph with {} vertices", adjlists.len());
    }

    let points = io::read_fbin(&args.base, Some(adjlists.len()))?;
    if points.len() != adjlists.len() {
        return Err(Error::Input(format!(
            "graph has {} vertices but base file holds {} points",
            adjlists.len(),
            points.len()
        ))
        .into());
    }
    if args.source as usize >= points.len() {
        return Err(Error::Input(format!(
            "source vertex {} out of range for {} points",
            args.source,
            points.len()
        ))
        .into());
    }

    let queries = match &args.query {
        Some(path) if path != &args.base => io::read_fbin(path, None)?,
        _ => io::read_fbin(&args.base, Some(adjlists.len()))?,
    };
    if queries.dim() != points.dim() {
        return Err(Error::DimensionMismatch {
            expected: points.dim(),
            actual: queries.dim(),
        }
        .into());
    }
    if !cli.no_progress {
        println!(
            "Walking {} queries from source {}",
            style(queries.len()).bold(),
            args.source
        );
    }

    let ground_truth = match &args.ground_truth {
        Some(path) => {
            let gt = io::read_ground_truth(path)?;
            if gt.len() != queries.len() {
                return Err(Error::Input(format!(
                    "ground truth holds {} rows for {} queries",
                    gt.len(),
                    queries.len()
                ))
                .into());
            }
            gt
        }
        None => {
            if cli.verbose {
                println!("Computing ground truth by brute force");
            }
            compute_ground_truth(&points, &queries, args.k)
        }
    };

    let start = Instant::now();
    let results: Vec<(u32, usize)> = (0..queries.len())
        .into_par_iter()
        .map_init(
            || WalkScratch::new(points.len()),
            |scratch, q| {
                greedy_walk_with_scratch(
                    &adjlists,
                    &points,
                    args.source,
                    queries.point(q),
                    scratch,
                )
            },
        )
        .collect();
    let query_time = start.elapsed().as_secs_f64();

    let correct = results
        .iter()
        .zip(&ground_truth)
        .filter(|((terminal, _), truth)| truth[..args.k.min(truth.len())].contains(terminal))
        .count();
    let recall = correct as f64 / queries.len().max(1) as f64;
    let avg_comps = results.iter().map(|(_, c)| c).sum::<usize>() as f64
        / queries.len().max(1) as f64;

    println!("Recall@{}: {:.4}", args.k, recall);
    println!("Avg distance computations: {:.1}", avg_comps);
    println!("Query time: {:.3} s", query_time);
    println!("Avg QPS: {:.0}", queries.len() as f64 / query_time);

    Ok(())
}
