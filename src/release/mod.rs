//! Version-gated release packing with bounded history
//!
//! # Flow
//!
//! 1. Read the current version from the manifest
//! 2. Scan the releases directory for `<prefix><version><suffix>` archives
//! 3. Gate: build when the version is newer, or when forced (with confirmation)
//! 4. Build: run the pack command, remove transient build output
//! 5. Re-scan and prune everything beyond the newest `retain` archives
//!
//! Archives are never modified, only created by the pack command or deleted by
//! the pruner.

pub mod builder;
pub mod gate;
pub mod inventory;
pub mod retention;
pub mod version;

pub use gate::{Confirm, Decision, GateOptions, Outcome};
pub use inventory::{ArchiveNaming, ReleaseArchive, ReleaseInventory};
pub use version::Version;
