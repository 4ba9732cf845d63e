// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Taxify

// Storage
pub const TAXIFY_DATA_DIR: &str = "TAXIFY_DATA_DIR";

// AI Gateway
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_MODEL: &str = "ANTHROPIC_MODEL";
pub const TAXIFY_AI_API_URL: &str = "TAXIFY_AI_API_URL";
pub const TAXIFY_HTTP_REQUEST_TIMEOUT_SECS: &str = "TAXIFY_HTTP_REQUEST_TIMEOUT_SECS";
pub const TAXIFY_HTTP_CONNECT_TIMEOUT_SECS: &str = "TAXIFY_HTTP_CONNECT_TIMEOUT_SECS";

// Simulated login
pub const TAXIFY_LOGIN_DELAY_MS: &str = "TAXIFY_LOGIN_DELAY_MS";

// System Environment Variables
pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE"; // Windows
