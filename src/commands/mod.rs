//! CLI commands for filosign-pack
//!
//! - **pack**: gate the manifest version, build the archive, prune old releases

pub mod pack;

pub use pack::{PackOptions, run_pack};
