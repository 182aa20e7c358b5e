use anyhow::{anyhow, Result};

/// Telegram's limit for a single text message.
pub const MAX_MESSAGE_CHARS: usize = 4096;
/// Telegram's limit for a single poll option.
pub const MAX_POLL_OPTION_CHARS: usize = 100;
/// Telegram's limit for a poll question.
pub const MAX_POLL_QUESTION_CHARS: usize = 255;

/// A quiz name or description: one non-empty line within the message limit.
pub fn validate_quiz_title(title: &str) -> Result<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(anyhow!("Quiz title cannot be empty"));
    }

    if title.contains('\n') || title.contains('\r') {
        return Err(anyhow!("Quiz title cannot contain line breaks"));
    }

    validate_message_length(title)
}

/// Rejects text over [`MAX_MESSAGE_CHARS`].
pub fn validate_message_length(text: &str) -> Result<()> {
    let length = text.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(anyhow!(
            "Message is {} characters long (max {})",
            length,
            MAX_MESSAGE_CHARS
        ));
    }
    Ok(())
}

/// Checks a poll against Telegram's question, option and count limits.
pub fn validate_poll(question: &str, options: &[String]) -> Result<()> {
    if question.trim().is_empty() {
        return Err(anyhow!("Poll question cannot be empty"));
    }
    if question.chars().count() > MAX_POLL_QUESTION_CHARS {
        return Err(anyhow!(
            "Poll question cannot be longer than {} characters",
            MAX_POLL_QUESTION_CHARS
        ));
    }
    if options.len() < 2 || options.len() > 10 {
        return Err(anyhow!("Poll must have between 2 and 10 options"));
    }
    for option in options {
        if option.trim().is_empty() {
            return Err(anyhow!("Poll option cannot be empty"));
        }
        if option.chars().count() > MAX_POLL_OPTION_CHARS {
            return Err(anyhow!(
                "Poll option '{}' is too long (max {} characters)",
                option,
                MAX_POLL_OPTION_CHARS
            ));
        }
    }
    Ok(())
}

/// Telegram username rules: 5-32 ASCII letters, digits or `_`, starting with a letter.
pub fn validate_bot_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(anyhow!("Username cannot be empty"));
    }

    if username.len() < 5 || username.len() > 32 {
        return Err(anyhow!("Username must be between 5 and 32 characters long"));
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(anyhow!(
            "Username can only contain letters, numbers, and underscores"
        ));
    }

    if !username.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(anyhow!("Username must start with a letter"));
    }

    Ok(())
}
