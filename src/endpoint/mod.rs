//! The narrow chat capability the quiz driver needs.
//!
//! Anything that can send a text, send a quiz poll and read back recent
//! messages of a chat can drive quiz creation. The production implementation
//! is [`telegram::TelegramEndpoint`] (cargo feature `telegram`).

use anyhow::Result;
use async_trait::async_trait;

/// MTProto user-account endpoint.
#[cfg(feature = "telegram")]
pub mod telegram;

/// Message id as assigned by the chat service.
pub type MessageId = i32;

/// Where a message goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A user or bot, by username without `@`.
    Username(String),
    /// The account's own "Saved Messages" chat.
    SavedMessages,
}

impl Target {
    /// Accepts the name with or without `@`.
    pub fn username(name: &str) -> Self {
        Target::Username(name.trim_start_matches('@').to_string())
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Username(name) => write!(f, "@{name}"),
            Target::SavedMessages => write!(f, "Saved Messages"),
        }
    }
}

/// How the chat service should interpret message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// Sent verbatim.
    Plain,
    /// Telegram markdown; special characters must be escaped.
    Markdown,
}

/// A single-choice quiz poll with one marked correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPoll {
    /// Poll caption shown above the options.
    pub question: String,
    /// Option labels, in display order.
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_option: usize,
    /// Whether voters stay hidden.
    pub anonymous: bool,
}

/// A message read back from a chat's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Id of the message in its chat.
    pub id: MessageId,
    /// Message text; empty for media without a caption.
    pub text: String,
    /// Sent by us rather than by the other side.
    pub outgoing: bool,
}

/// A chat service the quiz driver can talk through.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Sends a text message and returns its id.
    async fn send_text(
        &self,
        target: &Target,
        text: &str,
        format: MessageFormat,
    ) -> Result<MessageId>;

    /// Sends a quiz-mode poll and returns its message id.
    async fn send_quiz_poll(&self, target: &Target, poll: &QuizPoll) -> Result<MessageId>;

    /// Up to `limit` most recent messages, newest first.
    async fn recent_messages(&self, target: &Target, limit: usize) -> Result<Vec<ChatMessage>>;
}
