//! Command-line interface: batch solving, analysis, single-candidate verification

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithm::library::{CandidateLibrary, Transformation, standard_library};
use crate::algorithm::scoring::{ScoreSummary, Scoreboard, TaskScore};
use crate::algorithm::search::{BatchOutcome, ResultRecord, SearchController};
use crate::algorithm::verification::{FailureReason, VerificationOutcome, verify};
use crate::analysis::profile::{AnalysisProfile, analyze};
use crate::io::configuration::SOLUTION_EXTENSION;
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::loader::{collect_task_files, load_task};
use crate::io::progress::ProgressManager;
use crate::task::example::ExampleGroup;

#[derive(Parser)]
#[command(name = "gridgolf")]
#[command(
    author,
    version,
    about = "Search for the shortest grid transformation program reproducing ARC examples"
)]
/// Command-line arguments for the solver
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations
#[derive(Subcommand)]
pub enum Command {
    /// Search every task file and print the scoreboard
    Solve(SolveArgs),
    /// Print the diagnostic profile of one task
    Analyze {
        /// Task JSON file
        #[arg(value_name = "TASK")]
        task: PathBuf,

        /// Print the profile as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Verify one library candidate against every group of a task
    Verify {
        /// Task JSON file
        #[arg(value_name = "TASK")]
        task: PathBuf,

        /// Enumeration index of the candidate
        #[arg(short, long)]
        candidate: usize,
    },
    /// Print the candidate library in enumeration order
    List,
}

/// Arguments of the `solve` operation
#[derive(Args)]
pub struct SolveArgs {
    /// Task JSON file or directory of task files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write each solved program to `<DIR>/<task>.py`
    #[arg(short, long, value_name = "DIR")]
    pub solutions: Option<PathBuf>,

    /// Write every result record and the summary as JSON
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Render the accepted program's test outputs as PNG files
    #[arg(long, value_name = "DIR")]
    pub render: Option<PathBuf>,

    /// Try every candidate instead of skipping the ones the analyzer rules out
    #[arg(long)]
    pub no_prune: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl SolveArgs {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one parsed command against the standard library
pub struct TaskProcessor {
    cli: Cli,
    library: &'static CandidateLibrary,
}

impl TaskProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            library: standard_library(),
        }
    }

    /// Run the parsed command
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read, a single task cannot
    /// be loaded, the candidate index is out of range, or an output file
    /// cannot be written. Batch solving records per-task errors on the
    /// scoreboard instead of returning them.
    pub fn process(&self) -> Result<()> {
        match &self.cli.command {
            Command::Solve(args) => self.run_solve(args),
            Command::Analyze { task, json } => Self::run_analyze(task, *json),
            Command::Verify { task, candidate } => self.run_verify(task, *candidate),
            Command::List => {
                emit(&format_library(self.library));
                Ok(())
            }
        }
    }

    fn run_solve(&self, args: &SolveArgs) -> Result<()> {
        let files = collect_task_files(&args.target)?;
        let progress = args.should_show_progress().then(|| {
            let mut manager = ProgressManager::new();
            manager.initialize(files.len());
            manager
        });

        let controller = SearchController::new(self.library).with_pruning(!args.no_prune);
        let tasks = files.iter().map(|path| {
            if let Some(ref manager) = progress {
                manager.start_task(path);
            }
            load_task(path)
        });
        let outcome = controller.search_batch(tasks, Scoreboard::new(), |result| {
            if let Some(ref manager) = progress {
                manager.complete_task(result);
            }
        });
        if let Some(ref manager) = progress {
            manager.finish();
        }

        let mut text = String::new();
        for result in &outcome.results {
            let _ = writeln!(text, "{}", format_result(result));
        }
        text.push_str(&format_summary(&outcome.scoreboard.summary()));
        emit(&text);

        if let Some(ref directory) = args.solutions {
            write_solutions(directory, &outcome)?;
        }
        if let Some(ref path) = args.report {
            write_report(path, &outcome)?;
        }
        if let Some(ref directory) = args.render {
            render_test_outputs(directory, &files, &outcome)?;
        }
        Ok(())
    }

    fn run_analyze(task: &Path, json: bool) -> Result<()> {
        let profile = analyze(&load_task(task)?);
        if json {
            let text = serde_json::to_string_pretty(&profile)
                .map_err(|source| file_system_error(task, "serialize profile", source.into()))?;
            emit(&text);
        } else {
            emit(&format_profile(&profile));
        }
        Ok(())
    }

    fn run_verify(&self, task: &Path, index: usize) -> Result<()> {
        let dataset = load_task(task)?;
        let candidate = self.library.get(index).ok_or_else(|| {
            invalid_parameter(
                "candidate",
                &index,
                &format!("library holds {} candidates", self.library.len()),
            )
        })?;
        emit(&format_verification(candidate, &verify(candidate, &dataset)));
        Ok(())
    }
}

// Allow print for command output on stdout
#[allow(clippy::print_stdout)]
fn emit(text: &str) {
    println!("{}", text.trim_end());
}

/// One line per task: status, program index, size and score
pub fn format_result(result: &Result<ResultRecord>) -> String {
    match result {
        Ok(record) if record.is_solved() => format!(
            "{}: solved by {} ({} bytes, score {:.0})",
            record.task,
            record
                .candidate
                .as_ref()
                .map_or_else(String::new, |candidate| format!("#{}", candidate.index())),
            record.byte_count.unwrap_or_default(),
            record.score,
        ),
        Ok(record) => match (&record.candidate, &record.outcome) {
            (Some(candidate), Some(outcome)) => format!(
                "{}: exhausted, best partial #{} passed {}/{}",
                record.task,
                candidate.index(),
                outcome.passed(),
                outcome.total(),
            ),
            _ => format!("{}: exhausted, no candidate matched train", record.task),
        },
        Err(error) => format!("error: {error}"),
    }
}

/// Multi-line scoreboard summary
pub fn format_summary(summary: &ScoreSummary) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Solved {}/{} ({:.1}%), {} errors",
        summary.solved,
        summary.attempted,
        summary.success_rate * 100.0,
        summary.errors,
    );
    let _ = writeln!(
        text,
        "Total score {:.0}, average {:.1}",
        summary.total, summary.average
    );
    if let (Some(min), Some(max), Some(median)) = (summary.min, summary.max, summary.median) {
        let _ = writeln!(text, "Min {min:.0}, median {median:.1}, max {max:.0}");
    }
    let _ = writeln!(
        text,
        "Projected over {} tasks: {:.0}",
        summary.projected_tasks, summary.projected_total
    );
    text
}

/// Human-readable analysis profile
pub fn format_profile(profile: &AnalysisProfile) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Task {}", profile.task);
    for pair in &profile.pairs {
        let _ = writeln!(
            text,
            "  {} {}: {}x{} -> {}x{} ({:?}), components {} -> {}",
            pair.group,
            pair.index,
            pair.input.dims.0,
            pair.input.dims.1,
            pair.output.dims.0,
            pair.output.dims.1,
            pair.dimension_change,
            pair.input.components,
            pair.output.components,
        );
    }
    let complexity = &profile.complexity;
    let _ = writeln!(
        text,
        "Max cells {} -> {}, colors {} -> {}",
        complexity.max_input_size,
        complexity.max_output_size,
        complexity.unique_input_colors,
        complexity.unique_output_colors,
    );
    let changed = profile.color_mapping.changed_colors();
    if profile.color_mapping.is_consistent() && !changed.is_empty() {
        let mapping: Vec<String> = changed
            .iter()
            .map(|(from, to)| format!("{from}->{to}"))
            .collect();
        let _ = writeln!(text, "Color mapping {}", mapping.join(", "));
    }
    let _ = writeln!(text, "Suggestions:");
    for suggestion in &profile.suggestions {
        let _ = writeln!(text, "  - {suggestion}");
    }
    text
}

/// Per-group counts and failure reasons of one candidate
pub fn format_verification(candidate: &Transformation, outcome: &VerificationOutcome) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "{candidate} ({} bytes, {})",
        candidate.byte_count(),
        candidate.family()
    );
    for group in outcome.groups() {
        let _ = writeln!(text, "  {}: {}/{}", group.group, group.passed, group.total);
    }
    for failure in outcome.failures() {
        let reason = match &failure.reason {
            FailureReason::OutputMismatch {
                dimension_mismatch: true,
                expected,
                actual,
            } => format!(
                "shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            FailureReason::OutputMismatch { .. } => String::from("cell values differ"),
            FailureReason::RuntimeFault { fault } => fault.to_string(),
            FailureReason::TypeViolation { detail } => format!("malformed output: {detail}"),
        };
        let _ = writeln!(text, "  {} {} failed: {reason}", failure.group, failure.index);
    }
    let _ = writeln!(
        text,
        "{}",
        if outcome.is_success() {
            "verified"
        } else {
            "rejected"
        }
    );
    text
}

/// Candidate library listing: index, family, size and program text
pub fn format_library(library: &CandidateLibrary) -> String {
    let mut text = String::new();
    for candidate in library {
        let _ = writeln!(
            text,
            "{:>4} {:<18} {:>4} {}",
            candidate.index(),
            candidate.family().name(),
            candidate.byte_count(),
            candidate.source()
        );
    }
    text
}

/// Write each solved task's program to `<directory>/<task>.py`
///
/// The file holds exactly the scored program text.
///
/// # Errors
///
/// Returns a file system error if the directory or a file cannot be written
pub fn write_solutions(directory: &Path, outcome: &BatchOutcome) -> Result<()> {
    fs::create_dir_all(directory)
        .map_err(|source| file_system_error(directory, "create directory", source))?;
    for record in outcome.results.iter().flatten() {
        if record.is_solved()
            && let Some(ref candidate) = record.candidate
        {
            let path = directory.join(format!("{}.{SOLUTION_EXTENSION}", record.task));
            fs::write(&path, candidate.source())
                .map_err(|source| file_system_error(&path, "write solution", source))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ReportEntry<'a> {
    Record(&'a ResultRecord),
    Error { error: String },
}

#[derive(Serialize)]
struct Report<'a> {
    results: Vec<ReportEntry<'a>>,
    tasks: &'a [TaskScore],
    summary: ScoreSummary,
}

/// Write every result and the scoreboard summary as pretty JSON
///
/// # Errors
///
/// Returns a file system error if the report cannot be written
pub fn write_report(path: &Path, outcome: &BatchOutcome) -> Result<()> {
    let report = Report {
        results: outcome
            .results
            .iter()
            .map(|result| match result {
                Ok(record) => ReportEntry::Record(record),
                Err(error) => ReportEntry::Error {
                    error: error.to_string(),
                },
            })
            .collect(),
        tasks: outcome.scoreboard.entries(),
        summary: outcome.scoreboard.summary(),
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| file_system_error(parent, "create directory", source))?;
    }
    let file = fs::File::create(path)
        .map_err(|source| file_system_error(path, "create report", source))?;
    serde_json::to_writer_pretty(file, &report)
        .map_err(|source| file_system_error(path, "write report", source.into()))
}

/// Render the accepted program's output on every `test` input of each solved task
///
/// Files are named `<task>_test_<index>.png`. `files` must be the task paths
/// the batch was run over, in the same order. Empty outputs are skipped.
///
/// # Errors
///
/// Returns an error if a solved task cannot be reloaded or an image cannot
/// be written
pub fn render_test_outputs(
    directory: &Path,
    files: &[PathBuf],
    outcome: &BatchOutcome,
) -> Result<()> {
    for (path, result) in files.iter().zip(&outcome.results) {
        let Ok(record) = result else { continue };
        let Some(candidate) = record.candidate.as_ref().filter(|_| record.is_solved()) else {
            continue;
        };
        let dataset = load_task(path)?;
        for (index, pair) in dataset.group(ExampleGroup::Test).iter().enumerate() {
            let produced = candidate
                .apply(&pair.input)
                .ok()
                .and_then(|raw| raw.validate().ok());
            if let Some(grid) = produced.filter(|grid| !grid.is_empty()) {
                let output_path = directory.join(format!("{}_test_{index}.png", record.task));
                export_grid_as_png(&grid, &output_path)?;
            }
        }
    }
    Ok(())
}
