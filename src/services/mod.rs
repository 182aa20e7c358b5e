/// Running a whole folder of quizzes
pub mod batch;
/// Quiz link extraction and the Saved Messages summary
pub mod links;
/// Answer shuffling
pub mod shuffle;
/// The quiz bot creation dialogue
pub mod submission;
