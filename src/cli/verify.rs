//! Navigability verification command.
//!
//! Builds a graph and probes every (source, target) pair with the greedy
//! walk. Any pair that misses its target is a navigability violation; a
//! handful are printed and the command exits nonzero.

use clap::Args;
use console::style;
use std::path::PathBuf;
use std::time::Instant;

use crate::graph::builder::MngBuilder;
use crate::graph::walk;
use crate::{graph, io};

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to the input .fbin point file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Truncate the dataset to its first N points
    #[arg(short, long)]
    pub sample_size: Option<usize>,

    /// Seed for shortcut edges and shuffle order
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Drop exact coordinate duplicates before construction
    #[arg(long)]
    pub dedup: bool,
}

pub fn run(args: VerifyArgs, cli: &crate::Cli) -> crate::Result<()> {
    let mut points = io::read_fbin(&args.input, args.sample_size)?;
    if args.dedup {
        points = points.dedup().0;
    }
    if !cli.no_progress {
        println!(
            "Verifying navigability over {} points ({} walks)",
            style(points.len()).bold(),
            points.len() * points.len()
        );
    }

    let start = Instant::now();
    let adjlists = MngBuilder::new().seed(args.seed).build(&points)?;
    let build_time = start.elapsed();
    let stats = graph::stats(&adjlists);

    let failures = walk::check_navigability(&adjlists, &points);

    if !cli.no_progress {
        println!(
            "Constructed in {} (avg degree {:.2}, max degree {})",
            humantime::format_duration(build_time),
            stats.avg_degree,
            stats.max_degree
        );
    }

    if failures.is_empty() {
        println!("{}", style("Navigable: all walks reached their target").green());
        Ok(())
    } else {
        println!(
            "{}",
            style(format!("{} walks missed their target", failures.len())).red()
        );
        for f in failures.iter().take(10) {
            println!(
                "  walk {} -> {} stopped at {}",
                f.source, f.target, f.terminal
            );
        }
        Err(anyhow::anyhow!(
            "navigability check failed on {} of {} walks",
            failures.len(),
            points.len() * points.len()
        ))
    }
}
