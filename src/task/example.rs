//! Example pairs and the groups they are organized into

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::{ARC_GEN_GROUP, TEST_GROUP, TRAIN_GROUP};
use crate::spatial::grid::Grid;

/// One input grid and the output the task expects for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplePair {
    /// Grid handed to the candidate
    pub input: Grid,
    /// Grid the candidate must reproduce exactly
    pub output: Grid,
}

impl ExamplePair {
    /// Pair an input with its expected output
    pub const fn new(input: Grid, output: Grid) -> Self {
        Self { input, output }
    }
}

/// Named group of examples with its own evaluation role
///
/// `Train` is the selection group. All three groups together form the full
/// correctness group used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExampleGroup {
    /// Selection group
    #[serde(rename = "train")]
    Train,
    /// Held-out test examples
    #[serde(rename = "test")]
    Test,
    /// Generated examples
    #[serde(rename = "arc-gen")]
    ArcGen,
}

impl ExampleGroup {
    /// Every group in verification order
    pub const ALL: [Self; 3] = [Self::Train, Self::Test, Self::ArcGen];

    /// Group name as it appears in task files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Train => TRAIN_GROUP,
            Self::Test => TEST_GROUP,
            Self::ArcGen => ARC_GEN_GROUP,
        }
    }
}

impl fmt::Display for ExampleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
