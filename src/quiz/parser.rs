//! Quiz file grammar:
//!
//! ```text
//! Quiz name
//! Quiz description
//!
//! Question text
//! A) option
//! B) option
//! C) option
//! D) option
//!
//! C) option
//! ```
//!
//! The block after the description repeats. Blank lines may separate the
//! question from its `A)` line; from there the option lines must be
//! consecutive and labeled in order. The correct-answer line follows after
//! optional blank lines. Broken blocks are skipped, the rest of the file is
//! still parsed.

use std::path::Path;

use thiserror::Error;

use crate::quiz::models::{
    render_question, split_option_label, Question, QuestionError, Quiz, ANSWER_COUNT,
};
use crate::utils::logging::log_question_skipped;
use crate::utils::validation::{validate_message_length, validate_quiz_title};

const SNIPPET_CHARS: usize = 60;

/// A quiz file that cannot be used at all.
#[derive(Debug, Error)]
pub enum QuizFileError {
    /// The file could not be read.
    #[error("cannot read {origin}: {source}")]
    Unreadable {
        /// Path of the file.
        origin: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fewer than two non-blank lines.
    #[error("{origin} must have at least 2 non-empty lines (name and description), found {found}")]
    TooShort {
        /// Path of the file.
        origin: String,
        /// Non-blank lines present.
        found: usize,
    },
    /// The name or description is not a usable title.
    #[error("invalid quiz {field} in {origin}: {reason}")]
    InvalidHeader {
        /// Path of the file.
        origin: String,
        /// `name` or `description`.
        field: &'static str,
        /// What the title check rejected.
        reason: String,
    },
    /// Every question block was rejected, or there were none.
    #[error("no valid questions found in {origin} ({skipped} skipped)")]
    NoQuestions {
        /// Path of the file.
        origin: String,
        /// Blocks rejected on the way.
        skipped: usize,
    },
}

/// A question block the parser dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedQuestion {
    /// 1-based line of the question text.
    pub line: usize,
    /// Start of the question text, shortened for logs.
    pub snippet: String,
    /// Why the block was dropped.
    pub reason: QuestionError,
}

/// A parsed quiz plus the blocks that did not make it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// The quiz built from the valid blocks.
    pub quiz: Quiz,
    /// Rejected blocks, in file order.
    pub skipped: Vec<SkippedQuestion>,
}

/// Reads and parses one quiz file, logging every skipped question.
pub fn parse_quiz_file(path: &Path) -> Result<Quiz, QuizFileError> {
    let origin = path.display().to_string();
    let outcome = parse_quiz_path(path)?;
    for skipped in &outcome.skipped {
        log_question_skipped(
            &origin,
            skipped.line,
            &skipped.snippet,
            &skipped.reason.to_string(),
        );
    }
    Ok(outcome.quiz)
}

/// Like [`parse_quiz_file`] but hands the diagnostics back instead of logging.
pub fn parse_quiz_path(path: &Path) -> Result<ParseOutcome, QuizFileError> {
    let origin = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| QuizFileError::Unreadable {
        origin: origin.clone(),
        source,
    })?;
    parse_quiz_str(&source, &origin)
}

/// Parses quiz text; `origin` only labels errors.
pub fn parse_quiz_str(source: &str, origin: &str) -> Result<ParseOutcome, QuizFileError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut cursor = Cursor { lines: &lines, pos: 0 };

    let non_empty = lines.iter().filter(|l| !l.trim().is_empty()).count();
    let (Some(name), Some(description)) = (cursor.next_line(), cursor.next_line()) else {
        return Err(QuizFileError::TooShort {
            origin: origin.to_string(),
            found: non_empty,
        });
    };
    let name = name.1.trim().to_string();
    let description = description.1.trim().to_string();
    validate_header(origin, "name", &name)?;
    validate_header(origin, "description", &description)?;

    let mut questions = Vec::new();
    let mut skipped = Vec::new();

    while let Some((index, line)) = cursor.next_line() {
        let text = line.trim();
        let mut skip = |reason: QuestionError| {
            skipped.push(SkippedQuestion {
                line: index + 1,
                snippet: snippet(text),
                reason,
            });
        };

        if split_option_label(text).is_some() {
            // Leftovers of a broken block; swallow the whole run of options.
            while cursor
                .peek_adjacent()
                .is_some_and(|l| split_option_label(l).is_some())
            {
                cursor.pos += 1;
            }
            skip(QuestionError::MisplacedOptions);
            continue;
        }

        cursor.skip_blanks_before_option(0);
        let mut answers = Vec::with_capacity(ANSWER_COUNT);
        while answers.len() < ANSWER_COUNT {
            match cursor.peek_adjacent().and_then(split_option_label) {
                Some((letter, _)) if letter == answers.len() => {
                    answers.push(lines[cursor.pos].trim().to_string());
                    cursor.pos += 1;
                }
                _ => break,
            }
        }
        if answers.is_empty() {
            skip(QuestionError::WrongOptionCount { found: 0 });
            continue;
        }

        let correct = cursor.next_line().map(|(_, l)| l.trim());
        if answers.len() != ANSWER_COUNT {
            skip(QuestionError::WrongOptionCount {
                found: answers.len(),
            });
            continue;
        }
        let Some(correct) = correct else {
            skip(QuestionError::MissingCorrectAnswer);
            continue;
        };

        let message = render_question(text, &answers);
        if let Err(e) = validate_message_length(&message) {
            skip(QuestionError::TooLong(e.to_string()));
            continue;
        }

        match Question::new(text, answers, correct) {
            Ok(question) => questions.push(question),
            Err(reason) => skip(reason),
        }
    }

    if questions.is_empty() {
        return Err(QuizFileError::NoQuestions {
            origin: origin.to_string(),
            skipped: skipped.len(),
        });
    }

    Ok(ParseOutcome {
        quiz: Quiz {
            name,
            description,
            questions,
        },
        skipped,
    })
}

fn validate_header(origin: &str, field: &'static str, value: &str) -> Result<(), QuizFileError> {
    validate_quiz_title(value).map_err(|e| QuizFileError::InvalidHeader {
        origin: origin.to_string(),
        field,
        reason: e.to_string(),
    })
}

fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{cut}...")
}

struct Cursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Next non-blank line with its 0-based index; consumes it.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        while self.pos < self.lines.len() {
            let index = self.pos;
            self.pos += 1;
            if !self.lines[index].trim().is_empty() {
                return Some((index, self.lines[index]));
            }
        }
        None
    }

    /// Moves past blank lines, but only when an option labeled `letter` follows them.
    fn skip_blanks_before_option(&mut self, letter: usize) {
        let next = (self.pos..self.lines.len()).find(|&i| !self.lines[i].trim().is_empty());
        if let Some(index) = next {
            if split_option_label(self.lines[index]).is_some_and(|(l, _)| l == letter) {
                self.pos = index;
            }
        }
    }

    /// The line right under the cursor, if it is not blank.
    fn peek_adjacent(&self) -> Option<&'a str> {
        self.lines
            .get(self.pos)
            .copied()
            .filter(|l| !l.trim().is_empty())
    }
}
