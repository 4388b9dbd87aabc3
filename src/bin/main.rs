//! navgraph command-line interface
//!
//! Tools for building minimum navigable graphs from binary point files,
//! querying them with greedy walks, and verifying navigability.

use clap::{Parser, Subcommand};
use console::style;

use navgraph::cli::{build, search, verify};

#[derive(Parser)]
#[command(name = "navgraph")]
#[command(about = "Minimum navigable graph construction and search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress output and decorations
    #[arg(long, global = true)]
    pub no_progress: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a navigable graph from a point file
    Build(build::BuildArgs),

    /// Run greedy-walk queries against a saved graph
    Search(search::SearchArgs),

    /// Build and exhaustively verify navigability
    Verify(verify::VerifyArgs),
}

fn main() -> navgraph::Result<()> {
    let cli_args = CliArgs::parse();

    let cli = navgraph::Cli {
        verbose: cli_args.verbose,
        no_progress: cli_args.no_progress,
    };

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    if !cli.no_progress {
        println!("{}", style("navgraph").bold().blue());
        println!(
            "{}",
            style("Navigable graph construction by per-vertex set cover").dim()
        );
        println!();
    }

    match cli_args.command {
        Commands::Build(args) => build::run(args, &cli),
        Commands::Search(args) => search::run(args, &cli),
        Commands::Verify(args) => verify::run(args, &cli),
    }
}
