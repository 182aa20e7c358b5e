#![allow(clippy::unwrap_used)]

use autoquiz::config::Config;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const OPTIONAL_KEYS: &[&str] = &[
    "QUIZZES_FOLDER",
    "SESSION_FILE",
    "BOT_USERNAME",
    "TIME_LIMIT",
    "SHUFFLE_MODE",
    "MESSAGE_DELAY_SECS",
    "POLL_DELAY_SECS",
    "QUIZ_DELAY_SECS",
    "REPLY_TIMEOUT_SECS",
];

fn set_required() {
    env::set_var("API_ID", "12345");
    env::set_var("API_HASH", "0123456789abcdef");
    env::set_var("PHONE_NUMBER", "+10000000000");
}

fn clear_all() {
    for key in ["API_ID", "API_HASH", "PHONE_NUMBER"].iter().chain(OPTIONAL_KEYS) {
        env::remove_var(key);
    }
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_all();
    set_required();

    let config = Config::from_env().unwrap();

    assert_eq!(config.api_id, 12345);
    assert_eq!(config.api_hash, "0123456789abcdef");
    assert_eq!(config.phone_number, "+10000000000");
    assert_eq!(config.quizzes_folder, PathBuf::from("./quizzes"));
    assert_eq!(config.session_file, PathBuf::from("autoquiz.session"));
    assert_eq!(config.bot_username, "QuizBot");
    assert_eq!(config.time_limit, "15 сек");
    assert_eq!(config.shuffle_mode, "Перемешать все");
    assert_eq!(config.message_delay, Duration::from_millis(2500));
    assert_eq!(config.poll_delay, Duration::from_secs(3));
    assert_eq!(config.quiz_delay, Duration::from_secs(5));
    assert_eq!(config.reply_timeout, Some(Duration::from_secs(10)));

    clear_all();
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_all();
    set_required();
    env::set_var("QUIZZES_FOLDER", "/srv/quizzes");
    env::set_var("SESSION_FILE", "/srv/me.session");
    env::set_var("BOT_USERNAME", "@OtherQuizBot");
    env::set_var("TIME_LIMIT", "30 сек");
    env::set_var("SHUFFLE_MODE", "Не перемешивать");
    env::set_var("MESSAGE_DELAY_SECS", "1");
    env::set_var("POLL_DELAY_SECS", " 0.5 ");
    env::set_var("QUIZ_DELAY_SECS", "0");
    env::set_var("REPLY_TIMEOUT_SECS", "0");

    let config = Config::from_env().unwrap();

    assert_eq!(config.quizzes_folder, PathBuf::from("/srv/quizzes"));
    assert_eq!(config.session_file, PathBuf::from("/srv/me.session"));
    assert_eq!(config.bot_username, "OtherQuizBot");
    assert_eq!(config.time_limit, "30 сек");
    assert_eq!(config.shuffle_mode, "Не перемешивать");
    assert_eq!(config.message_delay, Duration::from_secs(1));
    assert_eq!(config.poll_delay, Duration::from_millis(500));
    assert_eq!(config.quiz_delay, Duration::ZERO);
    // Zero disables reply waiting
    assert_eq!(config.reply_timeout, None);

    clear_all();
}

#[test]
fn test_config_missing_required_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    for key in ["API_ID", "API_HASH", "PHONE_NUMBER"] {
        clear_all();
        set_required();
        env::remove_var(key);

        let error_msg = Config::from_env().unwrap_err().to_string();
        assert!(error_msg.contains(&format!("{key} must be set")), "{error_msg}");

        // Blank counts as missing
        env::set_var(key, "   ");
        assert!(Config::from_env().is_err());
    }

    clear_all();
}

#[test]
fn test_config_invalid_values() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_all();
    set_required();

    env::set_var("API_ID", "not-a-number");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid API_ID"));
    env::set_var("API_ID", "12345");

    env::set_var("POLL_DELAY_SECS", "-1");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid POLL_DELAY_SECS"));
    env::remove_var("POLL_DELAY_SECS");

    env::set_var("BOT_USERNAME", "bad name");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid BOT_USERNAME"));

    clear_all();
}

#[test]
fn test_config_empty_optional_values_use_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_all();
    set_required();
    env::set_var("QUIZZES_FOLDER", "");
    env::set_var("MESSAGE_DELAY_SECS", " ");

    let config = Config::from_env().unwrap();
    assert_eq!(config.quizzes_folder, PathBuf::from("./quizzes"));
    assert_eq!(config.message_delay, Duration::from_millis(2500));
    assert_eq!(Config::quizzes_folder_from_env(), PathBuf::from("./quizzes"));

    clear_all();
}
