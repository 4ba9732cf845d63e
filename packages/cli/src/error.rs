// ABOUTME: Error type for assembling the CLI application context
// ABOUTME: Configuration and AI client start-up failures

use taxify_ai::AIServiceError;
use taxify_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("AI client error: {0}")]
    AiClient(#[from] AIServiceError),
}

pub type AppResult<T> = Result<T, AppError>;
