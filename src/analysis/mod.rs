//! Advisory task analysis: diagnostic profiles and search planning

/// Search plan that prunes candidates a task's `train` pairs rule out
pub mod planning;
/// Per-grid and per-task diagnostic profile with approach suggestions
pub mod profile;
/// Color distribution statistics
pub mod statistics;
