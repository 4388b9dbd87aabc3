//! navgraph: minimum navigable graph construction for nearest-neighbor search
//!
//! This crate builds sparse directed graphs over finite point sets such that
//! a greedy first-improving walk from any source vertex reaches the nearest
//! dataset point to any query. Construction works from the all-pairs metric
//! structure: a distance matrix, per-row distance orderings, and the induced
//! rank matrix feed per-vertex set-cover solvers that synthesize adjacency
//! lists close to the O(log n) navigability lower bound.
//!
//! The main entry point is [`graph::builder::build_mng`], which preprocesses
//! the metric, then exponentially searches for the smallest average-degree
//! budget under which the parallel per-vertex solver succeeds. Two simpler
//! set-cover synthesizers ([`cover::greedy`], [`cover::sampling`]) serve as
//! baselines and correctness references, and [`graph::walk`] provides the
//! greedy walk used both for queries and for verifying navigability.
//!
//! Construction is O(n²) in memory and distance computations by design; the
//! engine targets datasets small enough to hold three n×n matrices.

#![warn(missing_docs)]

/// Point sets and coordinate-level deduplication
pub mod points;

/// Squared-Euclidean distance kernel
pub mod distance;

/// Flat row-major matrices and the metric preprocessing pipeline
pub mod matrix;

/// Set-cover instance helpers and per-vertex cover solvers
pub mod cover;

/// Adjacency lists, the budgeted construction driver, and the greedy walk
pub mod graph;

/// Binary file formats (.fbin points, ground truth, graph files)
pub mod io;

/// Command-line interface modules
pub mod cli;

/// CLI configuration shared across subcommands
#[derive(Debug)]
pub struct Cli {
    /// Enable verbose output
    pub verbose: bool,
    /// Disable progress bars and decorations
    pub no_progress: bool,
}

// Re-export commonly used types
pub use graph::builder::{build_mng, MngBuilder};
pub use graph::walk::greedy_walk;
pub use graph::{AdjacencyLists, GraphStats};
pub use points::PointSet;

/// Result type for navgraph operations
pub type Result<T> = anyhow::Result<T>;

/// Error types for navgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dataset file missing or malformed
    #[error("invalid input: {0}")]
    Input(String),

    /// Vector of the wrong dimension
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the point set was created with
        expected: usize,
        /// Dimension actually supplied
        actual: usize,
    },

    /// A per-vertex solver found no candidate covering the remaining points.
    /// Impossible on metric input with distinct points; indicates a corrupted
    /// distance, permutation, or rank matrix.
    #[error("set cover infeasible for vertex {center}: no candidate covers any uncovered point")]
    CoverInfeasible {
        /// Vertex whose cover instance failed
        center: u32,
    },
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
