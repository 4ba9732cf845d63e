// ABOUTME: Runtime configuration for Taxify
// ABOUTME: Environment variable names and typed settings loaded from the environment

pub mod constants;
pub mod settings;

pub use settings::{Config, ConfigError, DEFAULT_AI_API_URL, DEFAULT_MODEL};
