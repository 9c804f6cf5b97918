//! Candidate library, evaluation, verification, search and scoring

/// Reference semantics of every candidate template
pub mod execution;
/// Template enumeration and canonical program text
pub mod library;
/// Program-size scoring and batch aggregation
pub mod scoring;
/// First-match search controller
pub mod search;
/// Candidate verification against example groups
pub mod verification;
