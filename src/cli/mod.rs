//! Command-line interface modules.

pub mod build;
pub mod search;
pub mod verify;
