use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tokio::time::{sleep, Instant};

use crate::config::Config;
use crate::endpoint::{ChatEndpoint, MessageFormat, MessageId, QuizPoll, Target};
use crate::quiz::models::Quiz;
use crate::services::links::LinkExtractor;
use crate::services::shuffle::{poll_letters, shuffle_question};
use crate::utils::logging::{
    log_quiz_error, log_quiz_start, log_quiz_success, log_quiz_without_link, log_script_step,
    log_timeout,
};
use crate::utils::validation::validate_poll;

/// The texts the quiz bot expects, in the order it asks for them.
#[derive(Debug, Clone)]
pub struct ScriptSettings {
    /// Quiz bot username, without `@`.
    pub bot_username: String,
    /// Sent first to clear any half-finished dialogue.
    pub cancel_command: String,
    /// Starts the creation dialogue.
    pub new_quiz_command: String,
    /// Ends the question list.
    pub done_command: String,
    /// Question of every poll; the real question goes in the text message.
    pub poll_caption: String,
    /// Answer to the time-limit question.
    pub time_limit: String,
    /// Last answer of the dialogue; the bot replies with the link.
    pub shuffle_mode: String,
    /// How many recent messages to search for the quiz link.
    pub history_window: usize,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            bot_username: "QuizBot".to_string(),
            cancel_command: "/cancel".to_string(),
            new_quiz_command: "/newquiz".to_string(),
            done_command: "/done".to_string(),
            poll_caption: "Ответ".to_string(),
            time_limit: "15 сек".to_string(),
            shuffle_mode: "Перемешать все".to_string(),
            history_window: 5,
        }
    }
}

/// How long to wait between scripted messages.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Pause after a text message when replies are not awaited.
    pub message_delay: Duration,
    /// Pause after a poll when replies are not awaited.
    pub poll_delay: Duration,
    /// Upper bound for waiting on the bot's reply; `None` uses the fixed delays.
    pub reply_timeout: Option<Duration>,
    /// How often history is polled while waiting for a reply.
    pub reply_check_interval: Duration,
    /// Gap between two quizzes.
    pub quiz_gap: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            message_delay: Duration::from_millis(2500),
            poll_delay: Duration::from_millis(3000),
            reply_timeout: Some(Duration::from_secs(10)),
            reply_check_interval: Duration::from_millis(500),
            quiz_gap: Duration::from_secs(5),
        }
    }
}

impl Pacing {
    /// No waiting at all.
    pub fn immediate() -> Self {
        Self {
            message_delay: Duration::ZERO,
            poll_delay: Duration::ZERO,
            reply_timeout: None,
            reply_check_interval: Duration::ZERO,
            quiz_gap: Duration::ZERO,
        }
    }
}

/// Everything [`QuizSubmitter`] needs besides the endpoint.
#[derive(Debug, Clone, Default)]
pub struct SubmissionSettings {
    /// What to say.
    pub script: ScriptSettings,
    /// When to say it.
    pub pacing: Pacing,
}

impl SubmissionSettings {
    /// Script texts and pacing from the runtime configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            script: ScriptSettings {
                bot_username: config.bot_username.clone(),
                time_limit: config.time_limit.clone(),
                shuffle_mode: config.shuffle_mode.clone(),
                ..ScriptSettings::default()
            },
            pacing: Pacing {
                message_delay: config.message_delay,
                poll_delay: config.poll_delay,
                reply_timeout: config.reply_timeout,
                quiz_gap: config.quiz_delay,
                ..Pacing::default()
            },
        }
    }
}

/// Replays quizzes into the quiz bot's creation dialogue.
pub struct QuizSubmitter<'a, E: ChatEndpoint + ?Sized> {
    endpoint: &'a E,
    settings: &'a SubmissionSettings,
    target: Target,
    links: LinkExtractor,
}

impl<'a, E: ChatEndpoint + ?Sized> QuizSubmitter<'a, E> {
    /// Fails when the poll caption or bot username cannot be used.
    pub fn new(endpoint: &'a E, settings: &'a SubmissionSettings) -> Result<Self> {
        let links = LinkExtractor::for_bot(&settings.script.bot_username)
            .context("Failed to build the quiz link pattern")?;
        validate_poll(&settings.script.poll_caption, &poll_letters())?;

        Ok(Self {
            endpoint,
            settings,
            target: Target::username(&settings.script.bot_username),
            links,
        })
    }

    /// Creates one quiz and returns its link.
    ///
    /// Never fails: an aborted script is logged and reported as `None`, the
    /// same as a script that finished without a recognizable link.
    pub async fn submit<R: Rng + ?Sized>(&self, quiz: &Quiz, rng: &mut R) -> Option<String> {
        log_quiz_start(
            &quiz.name,
            quiz.questions.len(),
            &self.settings.script.bot_username,
        );

        match self.run_script(quiz, rng).await {
            Ok(Some(link)) => {
                log_quiz_success(&quiz.name, &link);
                Some(link)
            }
            Ok(None) => {
                log_quiz_without_link(&quiz.name, self.settings.script.history_window);
                None
            }
            Err(e) => {
                log_quiz_error(&quiz.name, &format!("{e:#}"));
                tracing::debug!("Submission of '{}' aborted: {:?}", quiz.name, e);
                None
            }
        }
    }

    async fn run_script<R: Rng + ?Sized>(&self, quiz: &Quiz, rng: &mut R) -> Result<Option<String>> {
        let script = &self.settings.script;

        self.say(quiz, "cancel previous creation", &script.cancel_command)
            .await?;
        let started = self
            .say(quiz, "start new quiz", &script.new_quiz_command)
            .await?;
        self.say(quiz, "name", &quiz.name).await?;
        self.say(quiz, "description", &quiz.description).await?;

        let total = quiz.questions.len();
        for (number, question) in (1..).zip(&quiz.questions) {
            let shuffled = shuffle_question(question, rng);
            self.say(
                quiz,
                &format!("question {}/{}", number, total),
                &shuffled.message,
            )
            .await?;

            let poll = QuizPoll {
                question: script.poll_caption.clone(),
                options: poll_letters(),
                correct_option: shuffled.correct_index,
                anonymous: false,
            };
            log_script_step(
                &quiz.name,
                &format!("poll {}/{}, correct: {}", number, total, shuffled.correct_letter()),
            );
            let sent = self
                .endpoint
                .send_quiz_poll(&self.target, &poll)
                .await
                .with_context(|| format!("Failed to send poll for question {}", number))?;
            self.pace(sent, self.settings.pacing.poll_delay).await?;
        }

        self.say(quiz, "finish", &script.done_command).await?;
        self.say(quiz, "time limit", &script.time_limit).await?;
        self.say(quiz, "shuffle mode", &script.shuffle_mode).await?;

        self.find_link(started).await
    }

    async fn say(&self, quiz: &Quiz, step: &str, text: &str) -> Result<MessageId> {
        log_script_step(&quiz.name, step);
        let sent = self
            .endpoint
            .send_text(&self.target, text, MessageFormat::Plain)
            .await
            .with_context(|| format!("Failed to send {} to {}", step, self.target))?;
        self.pace(sent, self.settings.pacing.message_delay).await?;
        Ok(sent)
    }

    /// Waits for any bot reply newer than `sent`, or sleeps `fallback` when
    /// replies are not awaited. A missing reply is logged, not an error.
    async fn pace(&self, sent: MessageId, fallback: Duration) -> Result<()> {
        let pacing = &self.settings.pacing;
        let Some(timeout) = pacing.reply_timeout else {
            sleep(fallback).await;
            return Ok(());
        };

        let deadline = Instant::now() + timeout;
        loop {
            let recent = self
                .endpoint
                .recent_messages(&self.target, self.settings.script.history_window)
                .await
                .context("Failed to read bot replies")?;
            if recent.iter().any(|m| !m.outgoing && m.id > sent) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                let details = format!("no reply from {} to message {}", self.target, sent);
                log_timeout("waiting for bot reply", timeout.as_secs_f64(), Some(&details));
                return Ok(());
            }
            sleep(pacing.reply_check_interval).await;
        }
    }

    /// Looks for the quiz link among replies sent after `since`.
    async fn find_link(&self, since: MessageId) -> Result<Option<String>> {
        let pacing = &self.settings.pacing;
        let deadline = pacing.reply_timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let recent = self
                .endpoint
                .recent_messages(&self.target, self.settings.script.history_window)
                .await
                .context("Failed to read the quiz link")?;
            if let Some(link) = self.links.scan(recent.iter().filter(|m| m.id > since)) {
                return Ok(Some(link));
            }
            match deadline {
                Some(deadline) if Instant::now() < deadline => {
                    sleep(pacing.reply_check_interval).await;
                }
                _ => return Ok(None),
            }
        }
    }
}
