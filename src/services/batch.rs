use anyhow::{Context, Result};
use rand::Rng;
use tokio::time::sleep;

use crate::endpoint::{ChatEndpoint, MessageFormat, Target};
use crate::quiz::models::Quiz;
use crate::services::links::{format_summary, CreatedQuiz};
use crate::services::submission::{QuizSubmitter, SubmissionSettings};
use crate::utils::logging::log_system_event;

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Quizzes the run tried to create.
    pub attempted: usize,
    /// Quizzes that came back with a link, in submission order.
    pub created: Vec<CreatedQuiz>,
}

impl BatchReport {
    /// Quizzes that errored or produced no link.
    pub fn failed(&self) -> usize {
        self.attempted - self.created.len()
    }
}

/// Submits every quiz in order; a failed quiz never stops the batch.
pub async fn submit_all<E, R>(
    endpoint: &E,
    quizzes: &[Quiz],
    settings: &SubmissionSettings,
    rng: &mut R,
) -> Result<BatchReport>
where
    E: ChatEndpoint + ?Sized,
    R: Rng + ?Sized,
{
    let submitter = QuizSubmitter::new(endpoint, settings)?;
    let mut report = BatchReport::default();

    for (index, quiz) in quizzes.iter().enumerate() {
        if index > 0 {
            sleep(settings.pacing.quiz_gap).await;
        }
        report.attempted += 1;
        if let Some(link) = submitter.submit(quiz, rng).await {
            report.created.push(CreatedQuiz {
                name: quiz.name.clone(),
                link,
            });
        }
    }

    Ok(report)
}

/// Sends the link summary to Saved Messages. Returns `false` when there was
/// nothing to send.
pub async fn save_links<E>(endpoint: &E, created: &[CreatedQuiz]) -> Result<bool>
where
    E: ChatEndpoint + ?Sized,
{
    let Some(summary) = format_summary(created) else {
        log_system_event("No quiz links to save", None);
        return Ok(false);
    };

    endpoint
        .send_text(&Target::SavedMessages, &summary, MessageFormat::Markdown)
        .await
        .context("Failed to save quiz links to Saved Messages")?;
    log_system_event(
        "Quiz links saved",
        Some(&format!("{} link(s) sent to {}", created.len(), Target::SavedMessages)),
    );
    Ok(true)
}

/// Submits all quizzes, then saves the collected links.
pub async fn run_batch<E, R>(
    endpoint: &E,
    quizzes: &[Quiz],
    settings: &SubmissionSettings,
    rng: &mut R,
) -> Result<BatchReport>
where
    E: ChatEndpoint + ?Sized,
    R: Rng + ?Sized,
{
    let report = submit_all(endpoint, quizzes, settings, rng).await?;
    save_links(endpoint, &report.created).await?;
    log_system_event(
        "All quizzes processed",
        Some(&format!(
            "created {}/{} quizzes",
            report.created.len(),
            report.attempted
        )),
    );
    Ok(report)
}
