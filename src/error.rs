use crate::config::ConfigError;
use crate::http::ServerError;

/// Startup failures surfaced to `main`. Any of these ends the process with a
/// non-zero exit status.
///
/// Per-connection failures never reach this type; they are handled inside the
/// connection task that hit them.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
