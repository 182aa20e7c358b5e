//! # AutoQuiz Main Entry Point
//!
//! Loads configuration, parses every quiz file in the quiz folder, signs in
//! to Telegram and creates the quizzes one after another in the quiz bot.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoquiz::config::Config;
use autoquiz::endpoint::telegram::TelegramEndpoint;
use autoquiz::quiz::load_folder;
use autoquiz::services::batch::run_batch;
use autoquiz::services::submission::SubmissionSettings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoquiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting AutoQuiz v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Quizzes: {}, Bot: @{}",
        config.quizzes_folder.display(),
        config.bot_username
    );

    let quizzes = load_folder(&config.quizzes_folder)?;
    info!("{} quiz(es) ready to create", quizzes.len());

    info!("Connecting to Telegram...");
    let endpoint = TelegramEndpoint::connect(&config).await?;
    info!("Connected to Telegram");

    let settings = SubmissionSettings::from_config(&config);
    let mut rng = StdRng::from_entropy();
    let result = run_batch(&endpoint, &quizzes, &settings, &mut rng).await;

    // The session is saved whether or not the batch succeeded
    if let Err(e) = endpoint.close() {
        tracing::warn!("Error closing Telegram session: {}", e);
    }

    let report = result?;
    info!(
        "Application stopped - created {}/{} quizzes",
        report.created.len(),
        report.attempted
    );
    Ok(())
}
