//! Task datasets and their validation
//!
//! Raw example rows are accepted as unconstrained integers so that every
//! structural problem in a task file surfaces as a dataset error naming the
//! task, the group and the offending pair.

use serde::Deserialize;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, dataset_error};
use crate::spatial::grid::Grid;
use crate::task::example::{ExampleGroup, ExamplePair};

/// Unvalidated example as read from a task file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawExample {
    /// Input rows
    pub input: Vec<Vec<i64>>,
    /// Expected output rows
    pub output: Vec<Vec<i64>>,
}

/// Unvalidated task as read from a task file; unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawTask {
    /// Selection examples
    #[serde(default)]
    pub train: Vec<RawExample>,
    /// Held-out test examples
    #[serde(default)]
    pub test: Vec<RawExample>,
    /// Generated examples
    #[serde(default, rename = "arc-gen")]
    pub arc_gen: Vec<RawExample>,
}

/// Named, validated set of example groups for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDataset {
    name: String,
    train: Vec<ExamplePair>,
    test: Vec<ExamplePair>,
    arc_gen: Vec<ExamplePair>,
}

impl TaskDataset {
    /// Build a dataset from already constructed pairs
    ///
    /// # Errors
    ///
    /// Returns a dataset error if `train` is empty or any grid exceeds the
    /// maximum dimension
    pub fn new(
        name: impl Into<String>,
        train: Vec<ExamplePair>,
        test: Vec<ExamplePair>,
        arc_gen: Vec<ExamplePair>,
    ) -> Result<Self> {
        let dataset = Self {
            name: name.into(),
            train,
            test,
            arc_gen,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Validate a raw task into a dataset
    ///
    /// # Errors
    ///
    /// Returns a dataset error for malformed grids, oversized grids or an
    /// empty `train` group
    pub fn from_raw(name: impl Into<String>, raw: &RawTask) -> Result<Self> {
        let name = name.into();
        let convert = |group: ExampleGroup, examples: &[RawExample]| {
            examples
                .iter()
                .enumerate()
                .map(|(index, example)| {
                    let grid = |rows: &[Vec<i64>], side: &str| {
                        Grid::from_raw_rows(rows).map_err(|malformed| {
                            dataset_error(&name, &format!("{group} pair {index} {side}: {malformed}"))
                        })
                    };
                    Ok(ExamplePair::new(
                        grid(&example.input, "input")?,
                        grid(&example.output, "output")?,
                    ))
                })
                .collect::<Result<Vec<_>>>()
        };
        let train = convert(ExampleGroup::Train, &raw.train)?;
        let test = convert(ExampleGroup::Test, &raw.test)?;
        let arc_gen = convert(ExampleGroup::ArcGen, &raw.arc_gen)?;
        Self::new(name, train, test, arc_gen)
    }

    fn validate(&self) -> Result<()> {
        if self.train.is_empty() {
            return Err(dataset_error(&self.name, &"train group has no examples"));
        }
        for (group, index, pair) in self.labeled_pairs() {
            for (side, grid) in [("input", &pair.input), ("output", &pair.output)] {
                let (rows, cols) = grid.dims();
                if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
                    return Err(dataset_error(
                        &self.name,
                        &format!(
                            "{group} pair {index} {side} is {rows}x{cols}, larger than {MAX_GRID_DIMENSION}x{MAX_GRID_DIMENSION}"
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Task name used in reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pairs of a single group, in file order
    pub fn group(&self, group: ExampleGroup) -> &[ExamplePair] {
        match group {
            ExampleGroup::Train => &self.train,
            ExampleGroup::Test => &self.test,
            ExampleGroup::ArcGen => &self.arc_gen,
        }
    }

    /// Selection group
    pub fn train(&self) -> &[ExamplePair] {
        &self.train
    }

    /// Every pair of every group with its group and position
    pub fn labeled_pairs(&self) -> impl Iterator<Item = (ExampleGroup, usize, &ExamplePair)> {
        ExampleGroup::ALL.into_iter().flat_map(move |group| {
            self.group(group)
                .iter()
                .enumerate()
                .map(move |(index, pair)| (group, index, pair))
        })
    }

    /// Total number of pairs across all groups
    pub fn pair_count(&self) -> usize {
        ExampleGroup::ALL
            .iter()
            .map(|&group| self.group(group).len())
            .sum()
    }
}
