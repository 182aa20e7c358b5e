/// Structured log helpers
pub mod logging;
/// Telegram markdown escaping
pub mod markdown;
/// Telegram limits and input checks
pub mod validation;
