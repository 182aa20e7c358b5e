use tracing::{debug, error, info, warn};

/// Logs the start of a quiz submission with consistent format
pub fn log_quiz_start(name: &str, questions: usize, bot: &str) {
    info!("QUIZ_START: '{}' ({} questions) via @{}", name, questions, bot);
}

/// Logs a created quiz and its link
pub fn log_quiz_success(name: &str, link: &str) {
    info!("QUIZ_SUCCESS: '{}' - {}", name, link);
}

/// Logs a submission that finished without a recognizable link
pub fn log_quiz_without_link(name: &str, scanned: usize) {
    warn!(
        "QUIZ_NO_LINK: '{}' - no quiz link in the last {} messages",
        name, scanned
    );
}

/// Logs an aborted quiz submission
pub fn log_quiz_error(name: &str, error: &str) {
    error!("QUIZ_ERROR: '{}' - {}", name, error);
}

/// Logs a single scripted step of a submission
pub fn log_script_step(name: &str, step: &str) {
    debug!("STEP: '{}' - {}", name, step);
}

/// Logs a question block dropped by the parser
pub fn log_question_skipped(origin: &str, line: usize, snippet: &str, reason: &str) {
    warn!(
        "QUESTION_SKIPPED: {}:{} '{}' - {}",
        origin, line, snippet, reason
    );
}

/// Logs a quiz file that could not be used
pub fn log_file_error(origin: &str, error: &str) {
    error!("FILE_ERROR: {} - {}", origin, error);
}

/// Logs timeout events with consistent format
pub fn log_timeout(operation: &str, duration_secs: f64, details: Option<&str>) {
    match details {
        Some(d) => warn!("TIMEOUT: {} after {:.1}s - {}", operation, duration_secs, d),
        None => warn!("TIMEOUT: {} after {:.1}s", operation, duration_secs),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
