//! Deterministic search for minimal grid transformation programs
//!
//! Given the example pairs of an ARC-style task, the engine walks a fixed,
//! ordered library of parameterized grid transformations, accepts the first
//! one that reproduces every `train` pair and is confirmed on the held-out
//! `test` and `arc-gen` pairs, and scores it by the byte length of its
//! canonical program.

/// Candidate library, execution semantics, verification, search and scoring
pub mod algorithm;
/// Advisory task profiling and the search plan derived from it
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Grid value type and structural grid operations
pub mod spatial;
/// Example pairs, example groups and validated task datasets
pub mod task;

pub use algorithm::search::ResultRecord;
pub use algorithm::verification::VerificationOutcome;
pub use analysis::profile::AnalysisProfile;
pub use io::error::{Result, SolverError};
pub use spatial::grid::Grid;
pub use task::dataset::TaskDataset;

use algorithm::library::{Transformation, standard_library};
use algorithm::search::SearchController;

/// Search the standard library for a program solving `dataset`
pub fn search(dataset: &TaskDataset) -> ResultRecord {
    SearchController::new(standard_library()).search(dataset)
}

/// Check one candidate against every group of `dataset`
pub fn verify(transformation: &Transformation, dataset: &TaskDataset) -> VerificationOutcome {
    algorithm::verification::verify(transformation, dataset)
}

/// Diagnostic profile of `dataset`
pub fn analyze(dataset: &TaskDataset) -> AnalysisProfile {
    analysis::profile::analyze(dataset)
}
