//! Core building blocks shared by the pack command
//!
//! - **config**: optional pack.toml parsing and validation
//! - **error**: error types with contextual help and exit codes
//! - **manifest**: package.json version reader
//! - **runner**: subprocess and filesystem side effects behind a trait

pub mod config;
pub mod error;
pub mod manifest;
pub mod runner;
