use thiserror::Error;

/// Labels of the four answer options, in order.
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Number of answer options every question carries.
pub const ANSWER_COUNT: usize = OPTION_LETTERS.len();

/// Why a question block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The question line is blank.
    #[error("question text is empty")]
    EmptyText,
    /// Fewer than four consecutive options `A)`..`D)`.
    #[error("expected 4 answer options, found {found}")]
    WrongOptionCount {
        /// Options collected before the run ended.
        found: usize,
    },
    /// Option lines with no question line above them.
    #[error("answer options appear without a question")]
    MisplacedOptions,
    /// The file ends before the correct-answer line.
    #[error("missing correct answer line")]
    MissingCorrectAnswer,
    /// The correct-answer line names none of the options.
    #[error("correct answer '{answer}' does not match any option")]
    UnresolvedCorrectAnswer {
        /// The correct-answer line as written.
        answer: String,
    },
    /// The rendered question exceeds the message length limit.
    #[error("{0}")]
    TooLong(String),
}

/// A four-option question whose correct answer is one of its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<String>,
    correct: usize,
}

impl Question {
    /// Builds a question, resolving `correct_answer` against the options.
    ///
    /// Resolution order: the exact option line, then the single option whose
    /// body (text after the `X)` label) equals it, then a leading option
    /// letter such as `C`, `C)` or `C. Paris`.
    pub fn new(
        text: &str,
        answers: Vec<String>,
        correct_answer: &str,
    ) -> Result<Self, QuestionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if answers.len() != ANSWER_COUNT {
            return Err(QuestionError::WrongOptionCount {
                found: answers.len(),
            });
        }
        let answers: Vec<String> = answers.iter().map(|a| a.trim().to_string()).collect();
        let correct = resolve_correct_answer(&answers, correct_answer).ok_or_else(|| {
            QuestionError::UnresolvedCorrectAnswer {
                answer: correct_answer.trim().to_string(),
            }
        })?;

        Ok(Self {
            text: text.to_string(),
            answers,
            correct,
        })
    }

    /// The question line, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The four option lines, labels included (`A) Paris`).
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Always an exact member of [`Question::answers`].
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct]
    }

    /// Position of [`Question::correct_answer`] in the options.
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    /// Question text followed by one option per line, as sent to the bot.
    pub fn render(&self) -> String {
        render_question(&self.text, &self.answers)
    }
}

/// A parsed quiz file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    /// First non-blank line of the file.
    pub name: String,
    /// Second non-blank line of the file.
    pub description: String,
    /// Valid questions, in file order.
    pub questions: Vec<Question>,
}

pub(crate) fn render_question(text: &str, options: &[String]) -> String {
    let mut message = text.to_string();
    for option in options {
        message.push('\n');
        message.push_str(option);
    }
    message
}

/// Splits `C) Paris` into the option index and `Paris`.
pub fn split_option_label(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let letter = chars.next()?;
    let index = OPTION_LETTERS.iter().position(|&l| l == letter)?;
    if chars.next()? != ')' {
        return None;
    }
    Some((index, chars.as_str().trim()))
}

/// Text of an option without its label, or the whole line if unlabeled.
pub fn option_body(option: &str) -> &str {
    split_option_label(option).map_or(option.trim(), |(_, body)| body)
}

fn resolve_correct_answer(answers: &[String], raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(index) = answers.iter().position(|a| a == raw) {
        return Some(index);
    }

    let mut by_body = answers
        .iter()
        .enumerate()
        .filter(|(_, a)| option_body(a) == raw)
        .map(|(i, _)| i);
    if let (Some(index), None) = (by_body.next(), by_body.next()) {
        return Some(index);
    }

    leading_letter(raw)
}

/// `C`, `C)`, `C.` or `C) anything` name option C; `Cairo` does not.
fn leading_letter(raw: &str) -> Option<usize> {
    let mut chars = raw.chars();
    let letter = chars.next()?;
    let index = OPTION_LETTERS.iter().position(|&l| l == letter)?;
    match chars.next() {
        None | Some(')') | Some('.') => Some(index),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec![
            "A) Berlin".to_string(),
            "B) Madrid".to_string(),
            "C) Paris".to_string(),
            "D) Rome".to_string(),
        ]
    }

    #[test]
    fn test_split_option_label() {
        assert_eq!(split_option_label("C) Paris"), Some((2, "Paris")));
        assert_eq!(split_option_label("A)Berlin"), Some((0, "Berlin")));
        assert_eq!(split_option_label("E) Lisbon"), None);
        assert_eq!(split_option_label("a) lower"), None);
        assert_eq!(split_option_label("Paris"), None);
        assert_eq!(split_option_label(""), None);
    }

    #[test]
    fn test_exact_match() {
        let q = Question::new("Capital of France?", options(), "C) Paris").unwrap();
        assert_eq!(q.correct_index(), 2);
        assert_eq!(q.correct_answer(), "C) Paris");
    }

    #[test]
    fn test_body_match() {
        let q = Question::new("Capital of Spain?", options(), "Madrid").unwrap();
        assert_eq!(q.correct_answer(), "B) Madrid");
    }

    #[test]
    fn test_letter_fallback() {
        for raw in ["D", "D)", "D.", "D) Roma"] {
            let q = Question::new("Capital of Italy?", options(), raw).unwrap();
            assert_eq!(q.correct_answer(), "D) Rome", "raw: {raw}");
        }
    }

    #[test]
    fn test_word_starting_with_letter_is_not_a_label() {
        let err = Question::new("Capital?", options(), "Cairo").unwrap_err();
        assert_eq!(
            err,
            QuestionError::UnresolvedCorrectAnswer {
                answer: "Cairo".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_option_count() {
        let err = Question::new("Capital?", options()[..3].to_vec(), "A) Berlin").unwrap_err();
        assert_eq!(err, QuestionError::WrongOptionCount { found: 3 });
    }

    #[test]
    fn test_render() {
        let q = Question::new("Capital of France?", options(), "C) Paris").unwrap();
        assert_eq!(
            q.render(),
            "Capital of France?\nA) Berlin\nB) Madrid\nC) Paris\nD) Rome"
        );
    }
}
