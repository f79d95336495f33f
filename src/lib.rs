//! Instance generation for the robust graph coloring problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type shared by the whole crate
pub mod error;

/// graph model (vertex count, edge set, pair enumeration)
pub mod graph;

/// read DIMACS graph descriptions
pub mod dimacs;

/// cost policies and cost assignment on non-adjacent pairs
pub mod cost;

/// generator configuration and color bounds
pub mod config;

/// instance bundle and fact file writer
pub mod instance;

/// fact file reader and instance summaries
pub mod facts;

/// generation over a directory of graphs
pub mod batch;

/// helper and utility methods for executables
pub mod util;

pub use error::{Error, Result};
