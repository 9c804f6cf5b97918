//! Input/output glue around the engine: errors, constants, loading and reporting

/// Command-line interface and batch driver
pub mod cli;
/// Engine constants and tooling defaults
pub mod configuration;
/// Error taxonomy and crate result alias
pub mod error;
/// PNG rendering of grids
pub mod image;
/// Task file discovery and JSON loading
pub mod loader;
/// Tracing subscriber setup
pub mod logging;
/// Progress display for batch runs
pub mod progress;
