//! Program-size scoring and explicit batch aggregation

use serde::Serialize;

use crate::algorithm::search::ResultRecord;
use crate::io::configuration::{
    DEFAULT_PROJECTED_TASKS, INCORRECT_SCORE, MIN_CORRECT_SCORE, SCORE_CEILING,
};

/// Score of a program with `byte_count` bytes
///
/// Correct programs earn `max(1, 2500 - byte_count)`; incorrect ones earn a
/// small positive constant so every score stays orderable.
pub fn score(correct: bool, byte_count: usize) -> f64 {
    if correct {
        (SCORE_CEILING.saturating_sub(byte_count) as f64).max(MIN_CORRECT_SCORE)
    } else {
        INCORRECT_SCORE
    }
}

/// One task's contribution to a scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskScore {
    /// Task name
    pub task: String,
    /// Whether a fully verified program was found
    pub solved: bool,
    /// Score earned
    pub score: f64,
    /// Size of the accepted program
    pub byte_count: Option<usize>,
    /// Dataset or loading error that aborted the task
    pub error: Option<String>,
}

/// Running aggregate over a batch of tasks
///
/// The scoreboard is owned by the caller and threaded through batch calls;
/// the engine keeps no score state of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    entries: Vec<TaskScore>,
    projected_tasks: usize,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics of a scoreboard
///
/// Score statistics cover solved tasks only; they are zero or absent when
/// nothing was solved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Tasks recorded, including aborted ones
    pub attempted: usize,
    /// Tasks with a fully verified program
    pub solved: usize,
    /// Tasks without one, including aborted ones
    pub failed: usize,
    /// Tasks aborted by a dataset or loading error
    pub errors: usize,
    /// Sum of solved scores
    pub total: f64,
    /// Mean solved score
    pub average: f64,
    /// Lowest solved score
    pub min: Option<f64>,
    /// Highest solved score
    pub max: Option<f64>,
    /// Median solved score
    pub median: Option<f64>,
    /// Solved tasks as a fraction of attempted tasks
    pub success_rate: f64,
    /// Task count the projection extrapolates to
    pub projected_tasks: usize,
    /// Average solved score times the projected task count
    pub projected_total: f64,
}

impl Scoreboard {
    /// Empty scoreboard projecting over the default task count
    pub const fn new() -> Self {
        Self::with_projection(DEFAULT_PROJECTED_TASKS)
    }

    /// Empty scoreboard projecting over `projected_tasks`
    pub const fn with_projection(projected_tasks: usize) -> Self {
        Self {
            entries: Vec::new(),
            projected_tasks,
        }
    }

    /// Add a finished search
    pub fn record(&mut self, record: &ResultRecord) {
        self.entries.push(TaskScore {
            task: record.task.clone(),
            solved: record.is_solved(),
            score: record.score,
            byte_count: record.is_solved().then_some(record.byte_count).flatten(),
            error: None,
        });
    }

    /// Add a task that could not be searched
    pub fn record_error(&mut self, task: impl Into<String>, error: &impl ToString) {
        self.entries.push(TaskScore {
            task: task.into(),
            solved: false,
            score: INCORRECT_SCORE,
            byte_count: None,
            error: Some(error.to_string()),
        });
    }

    /// Recorded tasks in insertion order
    pub fn entries(&self) -> &[TaskScore] {
        &self.entries
    }

    /// Compute summary statistics
    pub fn summary(&self) -> ScoreSummary {
        let mut solved: Vec<f64> = self
            .entries
            .iter()
            .filter(|entry| entry.solved)
            .map(|entry| entry.score)
            .collect();
        solved.sort_by(f64::total_cmp);

        let attempted = self.entries.len();
        let total: f64 = solved.iter().sum();
        let average = if solved.is_empty() {
            0.0
        } else {
            total / solved.len() as f64
        };
        let median = match solved.len() {
            0 => None,
            len if len % 2 == 1 => solved.get(len / 2).copied(),
            len => solved
                .get(len / 2 - 1)
                .zip(solved.get(len / 2))
                .map(|(lower, upper)| f64::midpoint(*lower, *upper)),
        };

        ScoreSummary {
            attempted,
            solved: solved.len(),
            failed: attempted - solved.len(),
            errors: self
                .entries
                .iter()
                .filter(|entry| entry.error.is_some())
                .count(),
            total,
            average,
            min: solved.first().copied(),
            max: solved.last().copied(),
            median,
            success_rate: if attempted == 0 {
                0.0
            } else {
                solved.len() as f64 / attempted as f64
            },
            projected_tasks: self.projected_tasks,
            projected_total: average * self.projected_tasks as f64,
        }
    }
}
