use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::models::{option_body, render_question, Question, OPTION_LETTERS};

/// A question with its options permuted and relabeled `A)`..`D)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledQuestion {
    /// Option lines in their new order, relabeled.
    pub options: Vec<String>,
    /// Position of the originally correct answer in `options`.
    pub correct_index: usize,
    /// Question text plus the relabeled options, one per line.
    pub message: String,
}

impl ShuffledQuestion {
    /// Label of the correct option after shuffling.
    pub fn correct_letter(&self) -> char {
        OPTION_LETTERS[self.correct_index]
    }
}

/// Permutes the options of `question` and tracks where the correct one lands.
pub fn shuffle_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ShuffledQuestion {
    let mut order: Vec<usize> = (0..question.answers().len()).collect();
    order.shuffle(rng);

    let options: Vec<String> = order
        .iter()
        .zip(OPTION_LETTERS)
        .map(|(&original, letter)| format!("{}) {}", letter, option_body(&question.answers()[original])))
        .collect();
    let correct_index = order
        .iter()
        .position(|&original| original == question.correct_index())
        .unwrap_or(question.correct_index());

    ShuffledQuestion {
        message: render_question(question.text(), &options),
        options,
        correct_index,
    }
}

/// Bare letters used as poll options; the full answers live in the message.
pub fn poll_letters() -> Vec<String> {
    OPTION_LETTERS.iter().map(|l| l.to_string()).collect()
}
