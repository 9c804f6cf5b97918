//! Verification of a candidate against example groups
//!
//! Every pair is evaluated independently. A fault or a malformed output on
//! one pair is recorded as that pair's failure and evaluation moves on to the
//! next pair. Equality is exact: same shape and same value in every cell.

use serde::Serialize;

use crate::algorithm::execution::Fault;
use crate::algorithm::library::Transformation;
use crate::task::dataset::TaskDataset;
use crate::task::example::{ExampleGroup, ExamplePair};

/// Why a single example failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// The candidate produced a grid that differs from the expected output
    OutputMismatch {
        /// Whether the shapes differ, not just the cell values
        dimension_mismatch: bool,
        /// Shape of the expected output
        expected: (usize, usize),
        /// Shape of the produced output
        actual: (usize, usize),
    },
    /// The candidate raised while evaluating the input
    RuntimeFault {
        /// Raised fault
        fault: Fault,
    },
    /// The candidate returned something that is not a grid
    TypeViolation {
        /// What is wrong with the returned rows
        detail: String,
    },
}

/// Failure of one example, located by group and position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleFailure {
    /// Group of the failing pair
    pub group: ExampleGroup,
    /// Position of the failing pair within its group
    pub index: usize,
    /// Classification of the failure
    pub reason: FailureReason,
}

/// Pass counts for one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    /// Evaluated group
    pub group: ExampleGroup,
    /// Number of pairs reproduced exactly
    pub passed: usize,
    /// Number of pairs in the group
    pub total: usize,
}

impl GroupOutcome {
    /// Whether every pair in the group passed
    pub const fn is_complete(&self) -> bool {
        self.passed == self.total
    }
}

/// Per-group counts and per-example failure reasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    groups: Vec<GroupOutcome>,
    failures: Vec<ExampleFailure>,
}

impl VerificationOutcome {
    /// Counts for every evaluated group, in verification order
    pub fn groups(&self) -> &[GroupOutcome] {
        &self.groups
    }

    /// Counts for one group, if it was evaluated
    pub fn group(&self, group: ExampleGroup) -> Option<&GroupOutcome> {
        self.groups.iter().find(|outcome| outcome.group == group)
    }

    /// Every failing example in evaluation order
    pub fn failures(&self) -> &[ExampleFailure] {
        &self.failures
    }

    /// Pairs passed across all evaluated groups
    pub fn passed(&self) -> usize {
        self.groups.iter().map(|outcome| outcome.passed).sum()
    }

    /// Pairs evaluated across all groups
    pub fn total(&self) -> usize {
        self.groups.iter().map(|outcome| outcome.total).sum()
    }

    /// Whether every evaluated pair passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.groups.iter().all(GroupOutcome::is_complete)
    }
}

/// Evaluate one pair
///
/// # Errors
///
/// Returns the reason the candidate does not reproduce `pair.output`
pub fn check_pair(
    transformation: &Transformation,
    pair: &ExamplePair,
) -> Result<(), FailureReason> {
    let raw = transformation
        .apply(&pair.input)
        .map_err(|fault| FailureReason::RuntimeFault { fault })?;
    let produced = raw
        .validate()
        .map_err(|malformed| FailureReason::TypeViolation {
            detail: malformed.to_string(),
        })?;
    if produced == pair.output {
        Ok(())
    } else {
        Err(FailureReason::OutputMismatch {
            dimension_mismatch: produced.dims() != pair.output.dims(),
            expected: pair.output.dims(),
            actual: produced.dims(),
        })
    }
}

fn verify_groups(
    transformation: &Transformation,
    dataset: &TaskDataset,
    groups: &[ExampleGroup],
) -> VerificationOutcome {
    let mut failures = Vec::new();
    let groups = groups
        .iter()
        .map(|&group| {
            let pairs = dataset.group(group);
            let mut passed = 0;
            for (index, pair) in pairs.iter().enumerate() {
                match check_pair(transformation, pair) {
                    Ok(()) => passed += 1,
                    Err(reason) => failures.push(ExampleFailure {
                        group,
                        index,
                        reason,
                    }),
                }
            }
            GroupOutcome {
                group,
                passed,
                total: pairs.len(),
            }
        })
        .collect();
    VerificationOutcome { groups, failures }
}

/// Full-dataset verification: every pair of `train`, `test` and `arc-gen`
pub fn verify(transformation: &Transformation, dataset: &TaskDataset) -> VerificationOutcome {
    verify_groups(transformation, dataset, &ExampleGroup::ALL)
}

/// Selection-group verification with complete counts
pub fn verify_selection(
    transformation: &Transformation,
    dataset: &TaskDataset,
) -> VerificationOutcome {
    verify_groups(transformation, dataset, &[ExampleGroup::Train])
}

/// Whether the candidate reproduces every `train` pair
///
/// Stops at the first failing pair.
pub fn selects(transformation: &Transformation, dataset: &TaskDataset) -> bool {
    dataset
        .train()
        .iter()
        .all(|pair| check_pair(transformation, pair).is_ok())
}
