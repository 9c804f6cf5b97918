//! Tests for command-line parsing, output formatting and result files

#[cfg(test)]
mod tests {
    use crate::{dataset, pair};
    use clap::Parser;
    use gridgolf::algorithm::library::{Template, Transformation, standard_library};
    use gridgolf::algorithm::scoring::Scoreboard;
    use gridgolf::algorithm::search::{BatchOutcome, SearchController};
    use gridgolf::algorithm::verification::verify;
    use gridgolf::analysis::profile::analyze;
    use gridgolf::io::cli::{
        Cli, Command, SolveArgs, TaskProcessor, format_library, format_profile, format_result,
        format_summary, format_verification, render_test_outputs, write_report, write_solutions,
    };
    use gridgolf::io::error::dataset_error;
    use gridgolf::io::loader::load_tasks;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const ROTATION_TASK: &str = r#"{
        "train": [{"input": [[1, 2], [3, 4]], "output": [[3, 1], [4, 2]]}],
        "test": [{"input": [[5, 6], [7, 8]], "output": [[7, 5], [8, 6]]}]
    }"#;

    fn write_task(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(format!("{name}.json"));
        fs::write(&path, text).unwrap();
        path
    }

    fn solve_args(argv: &[&str]) -> SolveArgs {
        match Cli::parse_from(argv).command {
            Command::Solve(args) => Some(args),
            _ => None,
        }
        .expect("solve command")
    }

    fn solve_files(files: &[PathBuf]) -> BatchOutcome {
        SearchController::new(standard_library()).search_batch(
            load_tasks(files),
            Scoreboard::new(),
            |_| {},
        )
    }

    // Tests solve parsing with only the required target
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_parse_solve_minimal() {
        let args = solve_args(&["gridgolf", "solve", "tasks"]);
        assert_eq!(args.target, PathBuf::from("tasks"));
        assert!(args.solutions.is_none());
        assert!(args.report.is_none());
        assert!(!args.no_prune);
        assert!(args.should_show_progress());
    }

    // Tests every solve flag
    // Verified by renaming the short flags
    #[test]
    fn test_parse_solve_all_flags() {
        let args = solve_args(&[
            "gridgolf",
            "solve",
            "tasks",
            "-s",
            "out",
            "-r",
            "report.json",
            "--render",
            "png",
            "--no-prune",
            "-q",
        ]);
        assert_eq!(args.solutions, Some(PathBuf::from("out")));
        assert_eq!(args.report, Some(PathBuf::from("report.json")));
        assert_eq!(args.render, Some(PathBuf::from("png")));
        assert!(args.no_prune);
        assert!(!args.should_show_progress());
    }

    #[test]
    fn test_parse_other_commands() {
        let cli = Cli::parse_from(["gridgolf", "verify", "t.json", "--candidate", "4"]);
        assert!(matches!(cli.command, Command::Verify { candidate: 4, .. }));

        let cli = Cli::parse_from(["gridgolf", "analyze", "t.json", "--json"]);
        assert!(matches!(cli.command, Command::Analyze { json: true, .. }));

        assert!(matches!(Cli::parse_from(["gridgolf", "list"]).command, Command::List));
        assert!(Cli::try_parse_from(["gridgolf", "verify", "t.json"]).is_err());
    }

    #[test]
    fn test_format_result_lines() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            write_task(dir.path(), "rot", ROTATION_TASK),
            write_task(dir.path(), "broken", "{}"),
        ];
        let outcome = solve_files(&files);

        let lines: Vec<String> = outcome.results.iter().map(format_result).collect();
        assert_eq!(
            lines.first().map(String::as_str),
            Some("rot: solved by #4 (46 bytes, score 2454)")
        );
        assert!(
            lines
                .get(1)
                .is_some_and(|line| line.starts_with("error: Invalid dataset 'broken'"))
        );

        let summary = format_summary(&outcome.scoreboard.summary());
        assert!(summary.starts_with("Solved 1/2 (50.0%), 1 errors"));
        assert!(summary.contains("Min 2454, median 2454.0, max 2454"));
    }

    #[test]
    fn test_format_exhausted_result() {
        let ds = dataset(
            vec![pair(&[&[1]], &[&[1]])],
            vec![pair(&[&[5, 6]], &[&[7, 7, 7]])],
            vec![],
        );
        let record = SearchController::new(standard_library()).search(&ds);
        assert_eq!(
            format_result(&Ok(record)),
            "task: exhausted, best partial #0 passed 1/2"
        );
        assert_eq!(
            format_result(&Err(dataset_error(&"t", &"bad"))),
            "error: Invalid dataset 't': bad"
        );
    }

    // Tests verification output lists counts and failure reasons
    #[test]
    fn test_format_verification() {
        let ds = dataset(
            vec![pair(&[&[1, 2]], &[&[2, 1]])],
            vec![pair(&[&[1, 2]], &[&[1, 2]])],
            vec![],
        );
        let candidate = Transformation::new(2, Template::FlipHorizontal);
        let text = format_verification(&candidate, &verify(&candidate, &ds));

        assert!(text.contains("#2 solve=lambda g:[r[::-1]for r in g]"));
        assert!(text.contains("train: 1/1"));
        assert!(text.contains("test: 0/1"));
        assert!(text.contains("test 0 failed: cell values differ"));
        assert!(text.trim_end().ends_with("rejected"));
    }

    #[test]
    fn test_format_profile_and_library() {
        let ds = dataset(
            vec![pair(&[&[1, 2], &[3, 4]], &[&[3, 1], &[4, 2]])],
            vec![],
            vec![],
        );
        let text = format_profile(&analyze(&ds));
        assert!(text.starts_with("Task task"));
        assert!(text.contains("  - 90° clockwise rotation"));
        assert!(text.contains("Color mapping 1->3, 2->1, 3->4, 4->2"));

        let listing = format_library(standard_library());
        assert_eq!(listing.lines().count(), standard_library().len());
        assert!(
            listing
                .lines()
                .next()
                .is_some_and(|line| line.contains("solve=lambda g:g"))
        );
    }

    // Tests solution files hold exactly the scored program text
    // Verified by appending a newline to written programs
    #[test]
    fn test_write_solutions() {
        let dir = TempDir::new().unwrap();
        let files = vec![write_task(dir.path(), "rot", ROTATION_TASK)];
        let outcome = solve_files(&files);

        let out = dir.path().join("solutions");
        write_solutions(&out, &outcome).unwrap();

        let program = fs::read_to_string(out.join("rot.py")).unwrap();
        assert_eq!(program, "solve=lambda g:[list(r)for r in zip(*g[::-1])]");
        assert_eq!(program.len(), 46);
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            write_task(dir.path(), "rot", ROTATION_TASK),
            write_task(dir.path(), "broken", "{}"),
        ];
        let outcome = solve_files(&files);

        let path = dir.path().join("reports").join("run.json");
        write_report(&path, &outcome).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let field = |pointer: &str| report.pointer(pointer).cloned();
        assert_eq!(field("/results/0/kind"), Some("record".into()));
        assert_eq!(field("/results/0/status"), Some("solved".into()));
        assert_eq!(field("/results/0/candidate/index"), Some(4.into()));
        assert_eq!(field("/results/1/kind"), Some("error".into()));
        assert_eq!(field("/summary/solved"), Some(1.into()));
        assert_eq!(field("/tasks/1/task"), Some("broken".into()));
    }

    #[test]
    fn test_render_test_outputs() {
        let dir = TempDir::new().unwrap();
        let files = vec![write_task(dir.path(), "rot", ROTATION_TASK)];
        let outcome = solve_files(&files);

        let out = dir.path().join("png");
        render_test_outputs(&out, &files, &outcome).unwrap();
        assert!(out.join("rot_test_0.png").exists());
    }

    // Tests processing surfaces bad targets and candidate indices
    // Verified by removing the candidate bounds check
    #[test]
    fn test_processor_errors() {
        let dir = TempDir::new().unwrap();
        let task = write_task(dir.path(), "rot", ROTATION_TASK);
        let task_arg = task.to_str().unwrap();

        let missing = dir.path().join("missing");
        let cli = Cli::parse_from(["gridgolf", "solve", missing.to_str().unwrap(), "-q"]);
        assert!(TaskProcessor::new(cli).process().is_err());

        let cli = Cli::parse_from(["gridgolf", "verify", task_arg, "-c", "100000"]);
        assert!(TaskProcessor::new(cli).process().is_err());

        let cli = Cli::parse_from(["gridgolf", "verify", task_arg, "-c", "4"]);
        assert!(TaskProcessor::new(cli).process().is_ok());
    }

    #[test]
    fn test_processor_solve_directory() {
        let dir = TempDir::new().unwrap();
        write_task(dir.path(), "rot", ROTATION_TASK);
        let solutions = dir.path().join("solutions");

        let cli = Cli::parse_from([
            "gridgolf",
            "solve",
            dir.path().to_str().unwrap(),
            "-q",
            "-s",
            solutions.to_str().unwrap(),
        ]);
        TaskProcessor::new(cli).process().unwrap();
        assert!(solutions.join("rot.py").exists());

        let task = dir.path().join("rot.json");
        let cli = Cli::parse_from(["gridgolf", "analyze", task.to_str().unwrap()]);
        assert!(TaskProcessor::new(cli).process().is_ok());
    }
}
