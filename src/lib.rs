//! # AutoQuiz
//!
//! A Telegram userbot that turns plain-text quiz files into @QuizBot quizzes.
//!
//! ## Features
//! - Parse quiz files (name, description, four-option questions)
//! - Shuffle answer order so the correct letter is not always the same
//! - Script the quiz bot's creation dialogue with reply-aware pacing
//! - Collect the resulting quiz links into Saved Messages

/// Configuration management and environment variables
pub mod config;
/// Chat endpoint capability and its Telegram implementation
pub mod endpoint;
/// Quiz models, file parsing and discovery
pub mod quiz;
/// Quiz submission, link extraction and batch runs
pub mod services;
/// Utility functions for logging, validation, and formatting
pub mod utils;
