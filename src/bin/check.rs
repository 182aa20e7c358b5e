//! Offline quiz file checker: parses a folder and reports what would be
//! uploaded, without connecting to Telegram.

use std::path::PathBuf;

use anyhow::Result;
use autoquiz::config::Config;
use autoquiz::quiz::require_quiz_files;
use autoquiz::quiz::parser::parse_quiz_path;
use std::env;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoquiz=warn".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str());

    match command {
        Some("help" | "--help" | "-h") => {
            print_help();
            Ok(())
        }
        Some(folder) => check_folder(PathBuf::from(folder)),
        None => {
            dotenvy::dotenv().ok();
            check_folder(Config::quizzes_folder_from_env())
        }
    }
}

fn check_folder(folder: PathBuf) -> Result<()> {
    println!("🔍 Checking quiz files in {}", folder.display());
    println!("================================================");

    let files = match require_quiz_files(&folder) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut valid = 0;
    for path in &files {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        match parse_quiz_path(path) {
            Ok(outcome) => {
                valid += 1;
                println!(
                    "✅ {}: '{}' ({} questions)",
                    name,
                    outcome.quiz.name,
                    outcome.quiz.questions.len()
                );
                for skipped in &outcome.skipped {
                    println!(
                        "  ⚠️  line {}: '{}' - {}",
                        skipped.line, skipped.snippet, skipped.reason
                    );
                }
            }
            Err(e) => println!("❌ {}: {}", name, e),
        }
    }

    println!();
    println!("📊 {}/{} file(s) ready to upload", valid, files.len());
    if valid == 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_help() {
    println!("📚 AutoQuiz - Quiz File Checker");
    println!();
    println!("USAGE:");
    println!("    autoquiz-check [FOLDER]");
    println!();
    println!("Parses every .txt quiz file without connecting to Telegram and");
    println!("reports the questions that would be skipped.");
    println!();
    println!("ENVIRONMENT:");
    println!("    QUIZZES_FOLDER   Folder used when none is given (default: ./quizzes)");
    println!();
}
