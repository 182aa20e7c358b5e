#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use autoquiz::endpoint::{ChatEndpoint, ChatMessage, MessageFormat, MessageId, QuizPoll, Target};

/// Something the driver sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        target: Target,
        text: String,
        format: MessageFormat,
    },
    Poll {
        target: Target,
        poll: QuizPoll,
    },
}

#[derive(Default)]
struct State {
    next_id: MessageId,
    history: Vec<(Target, ChatMessage)>,
    sent: Vec<Sent>,
    links_issued: usize,
}

/// In-memory stand-in for the quiz bot chat.
///
/// Replies with a link when it receives `link_trigger`, optionally
/// acknowledges every message, and fails when asked to send `fail_on`.
pub struct ScriptedEndpoint {
    state: Mutex<State>,
    pub link_trigger: Option<String>,
    pub ack_every_message: bool,
    pub fail_on: Option<String>,
}

impl ScriptedEndpoint {
    /// A bot that answers the shuffle-mode selection with a fresh link.
    pub fn quiz_bot() -> Self {
        Self {
            state: Mutex::new(State::default()),
            link_trigger: Some("Перемешать все".to_string()),
            ack_every_message: false,
            fail_on: None,
        }
    }

    /// A bot that never answers.
    pub fn silent() -> Self {
        Self {
            link_trigger: None,
            ..Self::quiz_bot()
        }
    }

    /// Acknowledges every message and poll with an "ok" reply.
    pub fn acking(mut self) -> Self {
        self.ack_every_message = true;
        self
    }

    /// Fails when asked to send exactly `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn texts_to(&self, target: &Target) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { target: t, text, .. } if &t == target => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn polls(&self) -> Vec<QuizPoll> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Poll { poll, .. } => Some(poll),
                _ => None,
            })
            .collect()
    }

    /// Puts an old incoming message into a chat's history.
    pub fn seed_incoming(&self, target: &Target, text: &str) {
        let mut state = self.state.lock().unwrap();
        push(&mut state, target, text, false);
    }

    fn react(&self, state: &mut State, target: &Target, text: &str) {
        if self.link_trigger.as_deref() == Some(text) {
            state.links_issued += 1;
            let reply = format!(
                "Тест готов!\nt.me/QuizBot?start=quiz{}",
                state.links_issued
            );
            push(state, target, &reply, false);
        } else if self.ack_every_message {
            push(state, target, "ok", false);
        }
    }
}

fn push(state: &mut State, target: &Target, text: &str, outgoing: bool) -> MessageId {
    state.next_id += 1;
    let id = state.next_id;
    state.history.push((
        target.clone(),
        ChatMessage {
            id,
            text: text.to_string(),
            outgoing,
        },
    ));
    id
}

#[async_trait]
impl ChatEndpoint for ScriptedEndpoint {
    async fn send_text(
        &self,
        target: &Target,
        text: &str,
        format: MessageFormat,
    ) -> Result<MessageId> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(anyhow!("connection reset"));
        }
        let mut state = self.state.lock().unwrap();
        state.sent.push(Sent::Text {
            target: target.clone(),
            text: text.to_string(),
            format,
        });
        let id = push(&mut state, target, text, true);
        self.react(&mut state, target, text);
        Ok(id)
    }

    async fn send_quiz_poll(&self, target: &Target, poll: &QuizPoll) -> Result<MessageId> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(Sent::Poll {
            target: target.clone(),
            poll: poll.clone(),
        });
        let id = push(&mut state, target, &poll.question, true);
        if self.ack_every_message {
            push(&mut state, target, "ok", false);
        }
        Ok(id)
    }

    async fn recent_messages(&self, target: &Target, limit: usize) -> Result<Vec<ChatMessage>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .history
            .iter()
            .rev()
            .filter(|(t, _)| t == target)
            .take(limit)
            .map(|(_, m)| m.clone())
            .collect())
    }
}

pub const GEO_QUIZ: &str = "\
Geo
Capitals

Capital of France?
A) Berlin
B) Madrid
C) Paris
D) Rome

C) Paris

Capital of Japan?
A) Seoul
B) Tokyo
C) Beijing
D) Bangkok

B) Tokyo
";
