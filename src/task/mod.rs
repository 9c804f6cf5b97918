//! Task model: example pairs, example groups and validated datasets

/// Validated task datasets and the raw form they are read from
pub mod dataset;
/// Example pairs and example groups
pub mod example;

pub use dataset::{RawExample, RawTask, TaskDataset};
pub use example::{ExampleGroup, ExamplePair};
