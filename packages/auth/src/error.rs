// ABOUTME: Error types for sign-in and onboarding
// ABOUTME: Wraps storage failures and rejects inconsistent onboarding answers

use taxify_storage::StorageError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not signed in. Run `taxify login` first")]
    NotAuthenticated,

    #[error("Onboarding is not complete. Run `taxify onboard` first")]
    NotOnboarded,

    #[error("Invalid onboarding data: {0}")]
    InvalidOnboarding(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
