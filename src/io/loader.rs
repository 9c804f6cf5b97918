//! Task file discovery and JSON loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::configuration::TASK_EXTENSION;
use crate::io::error::{Result, SolverError, file_system_error, invalid_parameter};
use crate::task::dataset::{RawTask, TaskDataset};

/// Parse task JSON text into a validated dataset named `name`
///
/// # Errors
///
/// Returns a parse error if the text is not a task document and a dataset
/// error if the examples fail validation
pub fn parse_task(name: &str, path: &Path, text: &str) -> Result<TaskDataset> {
    let raw: RawTask = serde_json::from_str(text).map_err(|source| SolverError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    TaskDataset::from_raw(name, &raw)
}

/// Load one task file; the dataset is named after the file stem
///
/// # Errors
///
/// Returns a file system error if the file cannot be read, otherwise as
/// [`parse_task`]
pub fn load_task(path: &Path) -> Result<TaskDataset> {
    let text =
        fs::read_to_string(path).map_err(|source| file_system_error(path, "read task", source))?;
    parse_task(&task_name(path), path, &text)
}

/// Task name for a file path
pub fn task_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

/// Task files named by `target`, sorted by path
///
/// A file is taken as is. A directory contributes every file with the task
/// extension directly inside it.
///
/// # Errors
///
/// Returns an invalid parameter error if `target` does not exist and a file
/// system error if the directory cannot be listed
pub fn collect_task_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        return Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a task file or a directory of task files",
        ));
    }

    let entries =
        fs::read_dir(target).map_err(|source| file_system_error(target, "list tasks", source))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| file_system_error(target, "list tasks", source))?
            .path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(TASK_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Lazily load each file in order
pub fn load_tasks(paths: &[PathBuf]) -> impl Iterator<Item = Result<TaskDataset>> + '_ {
    paths.iter().map(|path| load_task(path))
}
