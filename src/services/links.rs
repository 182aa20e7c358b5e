use regex::Regex;

use crate::endpoint::ChatMessage;
use crate::utils::markdown::{bold, escape_markdown};

const SUMMARY_HEADER: &str = "📚 Created Quizzes";

/// A quiz the bot confirmed, with its share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedQuiz {
    /// Quiz name as sent to the bot.
    pub name: String,
    /// `https://t.me/<bot>?start=<token>`
    pub link: String,
}

/// Finds `t.me/<bot>?start=<token>` links in bot replies.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Matches links of `bot_username` only, case-insensitively.
    pub fn for_bot(bot_username: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"t\.me/(?i:{})\?start=\w+",
            regex::escape(bot_username.trim_start_matches('@'))
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// The first link in `text`, normalized to `https://t.me/...`.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .find(text)
            .map(|m| format!("https://{}", m.as_str()))
    }

    /// Scans history (newest first) and returns the most recent link.
    pub fn scan<'a, I>(&self, messages: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a ChatMessage>,
    {
        messages
            .into_iter()
            .filter(|m| !m.outgoing)
            .find_map(|m| self.extract(&m.text))
    }
}

/// Markdown summary of created quizzes, `None` when there is nothing to save.
pub fn format_summary(created: &[CreatedQuiz]) -> Option<String> {
    if created.is_empty() {
        return None;
    }

    let mut lines = vec![bold(&escape_markdown(SUMMARY_HEADER)), String::new()];
    for quiz in created {
        lines.push(format!(
            "• {}: {}",
            bold(&escape_markdown(&quiz.name)),
            escape_markdown(&quiz.link)
        ));
    }
    Some(lines.join("\n"))
}
