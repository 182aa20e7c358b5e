use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::validation::validate_bot_username;

const DEFAULT_QUIZZES_FOLDER: &str = "./quizzes";
const DEFAULT_SESSION_FILE: &str = "autoquiz.session";
const DEFAULT_BOT_USERNAME: &str = "QuizBot";
const DEFAULT_TIME_LIMIT: &str = "15 сек";
const DEFAULT_SHUFFLE_MODE: &str = "Перемешать все";

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram application id (`API_ID`).
    pub api_id: i32,
    /// Telegram application hash (`API_HASH`).
    pub api_hash: String,
    /// Phone number of the account that creates the quizzes.
    pub phone_number: String,
    /// Folder scanned for `.txt` quiz files.
    pub quizzes_folder: PathBuf,
    /// Where the signed-in session is persisted between runs.
    pub session_file: PathBuf,
    /// Quiz bot username, without the leading `@`.
    pub bot_username: String,
    /// Answer time limit, exactly as the bot offers it.
    pub time_limit: String,
    /// Shuffle option, exactly as the bot offers it.
    pub shuffle_mode: String,
    /// Fixed pause after a text message.
    pub message_delay: Duration,
    /// Fixed pause after a poll.
    pub poll_delay: Duration,
    /// Pause between two quizzes.
    pub quiz_delay: Duration,
    /// `None` disables reply waiting; the fixed delays are used instead.
    pub reply_timeout: Option<Duration>,
}

impl Config {
    /// Reads every setting, failing on missing credentials or malformed numbers.
    pub fn from_env() -> Result<Self> {
        let api_id = required("API_ID")?;
        let api_id = api_id
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid API_ID"))?;
        let api_hash = required("API_HASH")?;
        let phone_number = required("PHONE_NUMBER")?;

        let bot_username = optional("BOT_USERNAME", DEFAULT_BOT_USERNAME);
        let bot_username = bot_username.trim().trim_start_matches('@').to_string();
        validate_bot_username(&bot_username)
            .map_err(|e| anyhow!("Invalid BOT_USERNAME: {}", e))?;

        let reply_timeout = secs("REPLY_TIMEOUT_SECS", 10.0)?;

        Ok(Config {
            api_id,
            api_hash,
            phone_number,
            quizzes_folder: Self::quizzes_folder_from_env(),
            session_file: PathBuf::from(optional("SESSION_FILE", DEFAULT_SESSION_FILE)),
            bot_username,
            time_limit: optional("TIME_LIMIT", DEFAULT_TIME_LIMIT),
            shuffle_mode: optional("SHUFFLE_MODE", DEFAULT_SHUFFLE_MODE),
            message_delay: secs("MESSAGE_DELAY_SECS", 2.5)?,
            poll_delay: secs("POLL_DELAY_SECS", 3.0)?,
            quiz_delay: secs("QUIZ_DELAY_SECS", 5.0)?,
            reply_timeout: (!reply_timeout.is_zero()).then_some(reply_timeout),
        })
    }

    /// Only the quiz folder, for tools that never touch Telegram.
    pub fn quizzes_folder_from_env() -> PathBuf {
        PathBuf::from(optional("QUIZZES_FOLDER", DEFAULT_QUIZZES_FOLDER))
    }
}

fn required(key: &str) -> Result<String> {
    let value = env::var(key).map_err(|_| anyhow!("{} must be set", key))?;
    if value.trim().is_empty() {
        return Err(anyhow!("{} must be set", key));
    }
    Ok(value)
}

fn optional(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn secs(key: &str, default: f64) -> Result<Duration> {
    let raw = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(Duration::from_secs_f64(default)),
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {}", key))?;
    Duration::try_from_secs_f64(value).map_err(|_| anyhow!("Invalid {}", key))
}
