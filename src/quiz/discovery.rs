use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::quiz::models::Quiz;
use crate::quiz::parser::parse_quiz_file;
use crate::utils::logging::log_file_error;

const QUIZ_EXTENSION: &str = "txt";

/// All `.txt` files directly inside `folder`, sorted by file name.
pub fn find_quiz_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(anyhow!("Quiz folder {} does not exist", folder.display()));
    }

    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to read quiz folder {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read quiz folder {}", folder.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == QUIZ_EXTENSION) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Like [`find_quiz_files`], but an empty folder is an error.
pub fn require_quiz_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let files = find_quiz_files(folder)?;
    if files.is_empty() {
        return Err(anyhow!("No .txt files found in {}", folder.display()));
    }
    Ok(files)
}

/// Parses every file on its own; broken files are logged and left out.
pub fn load_quizzes(files: &[PathBuf]) -> Vec<Quiz> {
    let mut quizzes = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        match parse_quiz_file(path) {
            Ok(quiz) => {
                info!("Parsed {}: '{}' ({} questions)", name, quiz.name, quiz.questions.len());
                quizzes.push(quiz);
            }
            Err(e) => log_file_error(&name, &e.to_string()),
        }
    }
    quizzes
}

/// Discovers and parses the quiz folder.
///
/// Fails when the folder holds no quiz files or when none of them parse.
pub fn load_folder(folder: &Path) -> Result<Vec<Quiz>> {
    let files = require_quiz_files(folder)?;
    info!("Found {} quiz file(s)", files.len());

    let quizzes = load_quizzes(&files);
    if quizzes.is_empty() {
        return Err(anyhow!("No valid quizzes found, check your quiz files"));
    }
    Ok(quizzes)
}
