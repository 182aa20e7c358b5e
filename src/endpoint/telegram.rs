//! MTProto user-account endpoint built on the `grammers` client.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use grammers_client::{Client, Config as ClientConfig, InitParams, InputMessage, SignInError};
use grammers_session::{PackedChat, Session};
use grammers_tl_types as tl;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::endpoint::{ChatEndpoint, ChatMessage, MessageFormat, MessageId, QuizPoll, Target};

/// A logged-in Telegram user session.
///
/// Call [`TelegramEndpoint::close`] when done so the session file keeps the
/// authorization for the next run.
pub struct TelegramEndpoint {
    client: Client,
    session_file: PathBuf,
    me: PackedChat,
    chats: Mutex<HashMap<String, PackedChat>>,
}

impl TelegramEndpoint {
    /// Connects and, on the first run, signs in interactively (login code and
    /// optional two-factor password are read from stdin).
    pub async fn connect(config: &Config) -> Result<Self> {
        let session = Session::load_file_or_create(&config.session_file).with_context(|| {
            format!(
                "Failed to open session file {}",
                config.session_file.display()
            )
        })?;

        let client = Client::connect(ClientConfig {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .context("Failed to connect to Telegram")?;

        if !client.is_authorized().await? {
            sign_in(&client, &config.phone_number).await?;
            client
                .session()
                .save_to_file(&config.session_file)
                .context("Failed to save session file")?;
        }

        let me = client.get_me().await.context("Failed to load own account")?;
        info!(
            "Signed in as {}",
            me.username().map_or_else(|| me.id().to_string(), |u| format!("@{u}"))
        );

        Ok(Self {
            client,
            session_file: config.session_file.clone(),
            me: me.pack(),
            chats: Mutex::new(HashMap::new()),
        })
    }

    /// Persists the session; the connection closes when `self` is dropped.
    pub fn close(self) -> Result<()> {
        self.client
            .session()
            .save_to_file(&self.session_file)
            .context("Failed to save session file")?;
        info!("Telegram session saved to {}", self.session_file.display());
        Ok(())
    }

    async fn resolve(&self, target: &Target) -> Result<PackedChat> {
        let username = match target {
            Target::SavedMessages => return Ok(self.me),
            Target::Username(username) => username,
        };

        if let Some(chat) = self.chats.lock().await.get(username) {
            return Ok(*chat);
        }

        let chat = self
            .client
            .resolve_username(username)
            .await?
            .ok_or_else(|| anyhow!("Username @{} not found", username))?
            .pack();
        debug!("Resolved @{}", username);
        self.chats.lock().await.insert(username.clone(), chat);
        Ok(chat)
    }

    /// Newest outgoing message in `chat`, for updates that carry no id.
    async fn last_outgoing_id(&self, chat: PackedChat) -> Result<MessageId> {
        let mut messages = self.client.iter_messages(chat).limit(5);
        while let Some(message) = messages.next().await? {
            if message.outgoing() {
                return Ok(message.id());
            }
        }
        Err(anyhow!("Sent message not found in history"))
    }
}

#[async_trait]
impl ChatEndpoint for TelegramEndpoint {
    async fn send_text(
        &self,
        target: &Target,
        text: &str,
        format: MessageFormat,
    ) -> Result<MessageId> {
        let chat = self.resolve(target).await?;
        let message = match format {
            MessageFormat::Plain => InputMessage::text(text),
            MessageFormat::Markdown => InputMessage::markdown(text),
        };
        let sent = self.client.send_message(chat, message).await?;
        Ok(sent.id())
    }

    async fn send_quiz_poll(&self, target: &Target, poll: &QuizPoll) -> Result<MessageId> {
        let chat = self.resolve(target).await?;

        let answers = poll
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                tl::types::PollAnswer {
                    text: text_with_entities(option),
                    option: vec![index as u8],
                }
                .into()
            })
            .collect();

        let media = tl::types::InputMediaPoll {
            poll: tl::types::Poll {
                id: 0,
                closed: false,
                public_voters: !poll.anonymous,
                multiple_choice: false,
                quiz: true,
                question: text_with_entities(&poll.question),
                answers,
                close_period: None,
                close_date: None,
            }
            .into(),
            correct_answers: Some(vec![vec![poll.correct_option as u8]]),
            solution: None,
            solution_entities: None,
        };

        let request = tl::functions::messages::SendMedia {
            silent: false,
            background: false,
            clear_draft: false,
            noforwards: false,
            update_stickersets_order: false,
            invert_media: false,
            peer: chat.to_input_peer(),
            reply_to: None,
            media: media.into(),
            message: String::new(),
            random_id: rand::random(),
            reply_markup: None,
            entities: None,
            schedule_date: None,
            send_as: None,
            quick_reply_shortcut: None,
            effect: None,
        };

        let updates = self
            .client
            .invoke(&request)
            .await
            .context("Failed to send quiz poll")?;
        match sent_message_id(&updates) {
            Some(id) => Ok(id),
            None => self.last_outgoing_id(chat).await,
        }
    }

    async fn recent_messages(&self, target: &Target, limit: usize) -> Result<Vec<ChatMessage>> {
        let chat = self.resolve(target).await?;
        let mut messages = self.client.iter_messages(chat).limit(limit);
        let mut recent = Vec::with_capacity(limit);
        while let Some(message) = messages.next().await? {
            recent.push(ChatMessage {
                id: message.id(),
                text: message.text().to_string(),
                outgoing: message.outgoing(),
            });
        }
        Ok(recent)
    }
}

async fn sign_in(client: &Client, phone_number: &str) -> Result<()> {
    info!("Signing in as {}", phone_number);
    let token = client
        .request_login_code(phone_number)
        .await
        .context("Failed to request login code")?;
    let code = prompt("Enter the code you received: ")?;

    match client.sign_in(&token, &code).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let hint = password_token.hint().unwrap_or("none").to_string();
            let password = prompt(&format!("Enter the password (hint {hint}): "))?;
            client
                .check_password(password_token, password.trim())
                .await
                .context("Two-factor password rejected")?;
        }
        Err(e) => return Err(anyhow!("Sign in failed: {}", e)),
    }

    info!("Signed in successfully");
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn text_with_entities(text: &str) -> tl::enums::TextWithEntities {
    tl::types::TextWithEntities {
        text: text.to_string(),
        entities: Vec::new(),
    }
    .into()
}

fn sent_message_id(updates: &tl::enums::Updates) -> Option<MessageId> {
    let tl::enums::Updates::Updates(updates) = updates else {
        return None;
    };
    updates.updates.iter().find_map(|update| match update {
        tl::enums::Update::MessageId(update) => Some(update.id),
        tl::enums::Update::NewMessage(update) => match &update.message {
            tl::enums::Message::Message(message) => Some(message.id),
            _ => None,
        },
        _ => None,
    })
}
