/// Finding and loading quiz files in a folder
pub mod discovery;
/// Questions, quizzes and option labels
pub mod models;
/// Quiz file parsing
pub mod parser;

pub use discovery::{find_quiz_files, load_folder, load_quizzes, require_quiz_files};
pub use models::*;
pub use parser::{parse_quiz_file, ParseOutcome, QuizFileError, SkippedQuestion};
