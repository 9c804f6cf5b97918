//! Search controller: first-match selection with held-out confirmation
//!
//! The controller walks the library in ascending enumeration order. A
//! candidate that reproduces every `train` pair is re-verified against the
//! full dataset; if that fails it is discarded for good and scanning resumes
//! at the next index. The first fully verified candidate is the answer.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::algorithm::library::{CandidateLibrary, Transformation};
use crate::algorithm::scoring::{Scoreboard, score};
use crate::algorithm::verification::{VerificationOutcome, selects, verify};
use crate::analysis::planning::SearchPlan;
use crate::io::error::{Result, SolverError};
use crate::task::dataset::TaskDataset;

/// Controller states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Drawing the candidate at `next`
    Scanning {
        /// Next enumeration index to try
        next: usize,
    },
    /// Candidate at `index` reproduced every `train` pair
    CandidateFound {
        /// Enumeration index of the candidate
        index: usize,
    },
    /// Candidate at `index` passed the full dataset
    FullyVerified {
        /// Enumeration index of the candidate
        index: usize,
        /// Full-dataset outcome
        outcome: VerificationOutcome,
    },
    /// Candidate at `index` matched `train` but failed held-out data
    PartiallyFailed {
        /// Enumeration index of the candidate
        index: usize,
        /// Full-dataset outcome
        outcome: VerificationOutcome,
    },
    /// Library exhausted without a fully verified candidate
    Exhausted,
}

impl SearchState {
    /// Whether the controller stops in this state
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyVerified { .. } | Self::Exhausted)
    }
}

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// A candidate passed every pair of every group
    Solved,
    /// No candidate did
    Exhausted,
}

/// Outcome of searching one task, handed to the caller
///
/// For a solved task `candidate` is the accepted program. For an exhausted
/// one it is the best partial candidate: the `train`-matching candidate with
/// the most full-dataset passes, lowest index first, or `None` if nothing
/// matched `train`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Task name
    pub task: String,
    /// How the search ended
    pub status: SearchStatus,
    /// Accepted or best partial candidate
    pub candidate: Option<Transformation>,
    /// Size of `candidate`'s program
    pub byte_count: Option<usize>,
    /// Score earned by the task
    pub score: f64,
    /// Full-dataset outcome of `candidate`
    pub outcome: Option<VerificationOutcome>,
    /// Candidates verified against `train`
    pub evaluated: usize,
    /// Candidates skipped by the search plan
    pub pruned: usize,
}

impl ResultRecord {
    /// Whether a fully verified candidate was found
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

// Train-matching candidate kept for the exhaustion report
struct PartialMatch {
    index: usize,
    outcome: VerificationOutcome,
}

/// Sequential search over a candidate library
#[derive(Debug, Clone, Copy)]
pub struct SearchController<'a> {
    library: &'a CandidateLibrary,
    pruning: bool,
}

impl<'a> SearchController<'a> {
    /// Controller over `library` with the analyzer's search plan enabled
    pub const fn new(library: &'a CandidateLibrary) -> Self {
        Self {
            library,
            pruning: true,
        }
    }

    /// Enable or disable the analyzer's search plan
    #[must_use]
    pub const fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Library the controller draws from
    pub const fn library(&self) -> &'a CandidateLibrary {
        self.library
    }

    /// Run the state machine to completion on one dataset
    pub fn search(&self, dataset: &TaskDataset) -> ResultRecord {
        let plan = self
            .pruning
            .then(|| SearchPlan::for_dataset(dataset, self.library));
        let mut evaluated = 0;
        let mut pruned = 0;
        let mut best: Option<PartialMatch> = None;
        let mut state = SearchState::Scanning { next: 0 };

        debug!(task = dataset.name(), candidates = self.library.len(), "search started");

        while !state.is_terminal() {
            state = match state {
                SearchState::Scanning { next } => match self.library.get(next) {
                    None => SearchState::Exhausted,
                    Some(_) if plan.as_ref().is_some_and(|plan| !plan.allows(next)) => {
                        pruned += 1;
                        SearchState::Scanning { next: next + 1 }
                    }
                    Some(candidate) => {
                        evaluated += 1;
                        if selects(candidate, dataset) {
                            SearchState::CandidateFound { index: next }
                        } else {
                            SearchState::Scanning { next: next + 1 }
                        }
                    }
                },
                SearchState::CandidateFound { index } => match self.library.get(index) {
                    Some(candidate) => {
                        let outcome = verify(candidate, dataset);
                        if outcome.is_success() {
                            SearchState::FullyVerified { index, outcome }
                        } else {
                            SearchState::PartiallyFailed { index, outcome }
                        }
                    }
                    None => SearchState::Exhausted,
                },
                SearchState::PartiallyFailed { index, outcome } => {
                    if best
                        .as_ref()
                        .is_none_or(|current| outcome.passed() > current.outcome.passed())
                    {
                        best = Some(PartialMatch { index, outcome });
                    }
                    SearchState::Scanning { next: index + 1 }
                }
                terminal @ (SearchState::FullyVerified { .. } | SearchState::Exhausted) => terminal,
            };
            trace!(task = dataset.name(), ?state, "transition");
        }

        let (status, accepted) = match state {
            SearchState::FullyVerified { index, outcome } => {
                (SearchStatus::Solved, Some(PartialMatch { index, outcome }))
            }
            _ => (SearchStatus::Exhausted, best),
        };
        let candidate = accepted
            .as_ref()
            .and_then(|accepted| self.library.get(accepted.index))
            .cloned();
        let byte_count = candidate.as_ref().map(Transformation::byte_count);
        let record = ResultRecord {
            task: dataset.name().to_owned(),
            status,
            score: score(
                status == SearchStatus::Solved,
                byte_count.unwrap_or_default(),
            ),
            candidate,
            byte_count,
            outcome: accepted.map(|accepted| accepted.outcome),
            evaluated,
            pruned,
        };

        debug!(
            task = %record.task,
            status = ?record.status,
            candidate = record.candidate.as_ref().map(Transformation::index),
            score = record.score,
            evaluated,
            pruned,
            "search finished"
        );
        record
    }

    /// Search every task in order, recording each into `scoreboard`
    ///
    /// A task that failed to load or validate is recorded as an error and the
    /// batch moves on. `observer` sees every result as it is produced.
    pub fn search_batch(
        &self,
        tasks: impl IntoIterator<Item = Result<TaskDataset>>,
        mut scoreboard: Scoreboard,
        mut observer: impl FnMut(&Result<ResultRecord>),
    ) -> BatchOutcome {
        let mut results = Vec::new();
        for task in tasks {
            let result = task.map(|dataset| self.search(&dataset));
            match &result {
                Ok(record) => scoreboard.record(record),
                Err(error) => {
                    warn!(%error, "task skipped");
                    scoreboard.record_error(task_label(error), error);
                }
            }
            observer(&result);
            results.push(result);
        }
        BatchOutcome {
            results,
            scoreboard,
        }
    }
}

/// Results of a batch and the scoreboard threaded through it
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-task results in input order
    pub results: Vec<Result<ResultRecord>>,
    /// Scoreboard with every task recorded
    pub scoreboard: Scoreboard,
}

// Best available name for a task that never produced a dataset
fn task_label(error: &SolverError) -> String {
    match error {
        SolverError::Dataset { task, .. } => task.clone(),
        SolverError::Parse { path, .. } | SolverError::FileSystem { path, .. } => path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned()),
        _ => String::from("<unknown>"),
    }
}
