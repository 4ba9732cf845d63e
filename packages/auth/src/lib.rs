// ABOUTME: Taxify sign-in library: simulated Google login, logout and onboarding
// ABOUTME: The stored profile doubles as the session; an email means "signed in"

pub mod error;
pub mod onboarding;
pub mod session;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use onboarding::OnboardingInput;
pub use session::{GoogleIdentity, SessionManager, SessionState};
