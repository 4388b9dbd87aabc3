//! Graph building command.
//!
//! Loads an `.fbin` dataset, constructs adjacency lists with the selected
//! set-cover solver, reports construction time and degree statistics, and
//! saves the graph file.

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use crate::cover::{greedy, sampling};
use crate::graph::builder::MngBuilder;
use crate::{graph, io, matrix};

/// Which per-vertex set-cover solver synthesizes the adjacency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Solver {
    /// Budgeted voting solver with exponential degree search
    Mng,
    /// Greedy max-coverage baseline
    Greedy,
    /// Sampling-voting baseline
    Sampling,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Path to the input .fbin point file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output graph file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Truncate the dataset to its first N points
    #[arg(short, long)]
    pub sample_size: Option<usize>,

    /// Set-cover solver
    #[arg(long, value_enum, default_value_t = Solver::Mng)]
    pub solver: Solver,

    /// Seed for shortcut edges and shuffle order
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Uncovered points sampled per round (sampling solver only)
    #[arg(long, default_value_t = sampling::DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Drop exact coordinate duplicates before construction
    #[arg(long)]
    pub dedup: bool,
}

pub fn run(args: BuildArgs, cli: &crate::Cli) -> crate::Result<()> {
    if !cli.no_progress {
        println!("{}", style("Building navigable graph").bold().green());
        println!("  Input: {}", args.input.display());
        println!("  Output: {}", args.output.display());
        println!("  Solver: {:?}", args.solver);
        println!();
    }

    if cli.verbose {
        println!("Loading points from {}...", args.input.display());
    }
    let mut points = io::read_fbin(&args.input, args.sample_size)?;

    if args.dedup {
        let before = points.len();
        let (unique, _) = points.dedup();
        points = unique;
        if cli.verbose && points.len() < before {
            println!("Dropped {} duplicate points", before - points.len());
        }
    }

    if !cli.no_progress {
        println!(
            "Loaded {} points of dimension {}",
            style(points.len()).bold(),
            style(points.dim()).bold()
        );
    }

    let spinner = if !cli.no_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.set_message("constructing adjacency lists...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let adjlists = match args.solver {
        Solver::Mng => MngBuilder::new().seed(args.seed).build(&points)?,
        Solver::Greedy => {
            let (_, permutations, ranks) = matrix::preprocess(&points)?;
            greedy::greedy_adjacency_lists(&permutations, &ranks)?
        }
        Solver::Sampling => {
            let (_, permutations, ranks) = matrix::preprocess(&points)?;
            sampling::sampling_adjacency_lists(&permutations, &ranks, args.seed, args.samples)?
        }
    };
    let elapsed = start.elapsed();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let stats = graph::stats(&adjlists);
    if !cli.no_progress {
        println!(
            "Constructed in {}",
            style(humantime::format_duration(elapsed)).bold().green()
        );
        println!("  Max degree: {}", stats.max_degree);
        println!("  Avg degree: {:.2}", stats.avg_degree);
    }

    io::write_graph(&args.output, &adjlists)?;
    if !cli.no_progress {
        println!("Saved to {}", args.output.display());
    }

    Ok(())
}
