// ABOUTME: Session manager for the simulated Google sign-in
// ABOUTME: Handles login, logout, status and the login/onboarding/dashboard routing decision

use std::time::Duration;

use serde::{Deserialize, Serialize};
use taxify_core::UserProfile;
use taxify_storage::{BlobStore, TaxifyDb};
use tracing::{debug, info};

use crate::error::{AuthError, AuthResult};
use crate::onboarding::{validate_onboarding, OnboardingInput};

/// Account data returned by the (simulated) identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleIdentity {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

impl Default for GoogleIdentity {
    fn default() -> Self {
        Self {
            name: "Тарас Шевченко".to_string(),
            email: "taras@example.com".to_string(),
            photo_url: Some("https://lh3.googleusercontent.com/a/default-user".to_string()),
        }
    }
}

/// Where the user should land after start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    NeedsOnboarding,
    Ready,
}

impl SessionState {
    pub fn of(profile: &UserProfile) -> Self {
        if !profile.is_authenticated() {
            SessionState::LoggedOut
        } else if !profile.is_onboarded {
            SessionState::NeedsOnboarding
        } else {
            SessionState::Ready
        }
    }
}

/// Session operations over the profile document
pub struct SessionManager<'a, S: BlobStore> {
    db: &'a TaxifyDb<S>,
    login_delay: Duration,
}

impl<'a, S: BlobStore> SessionManager<'a, S> {
    pub fn new(db: &'a TaxifyDb<S>, login_delay: Duration) -> Self {
        Self { db, login_delay }
    }

    /// Simulated Google sign-in.
    ///
    /// An existing signed-in profile is returned unchanged; otherwise the
    /// shell profile gets the identity's name, email and photo and is saved.
    pub async fn login_with_google(&self, identity: GoogleIdentity) -> AuthResult<UserProfile> {
        info!("Signing in as {}", identity.email);
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let profile = self.db.get_profile().await?;
        if profile.is_authenticated() {
            debug!("Profile already signed in as {:?}", profile.email);
            return Ok(profile);
        }

        let profile = UserProfile {
            name: identity.name,
            email: Some(identity.email),
            photo_url: identity.photo_url,
            ..profile
        };
        self.db.save_profile(&profile).await?;
        Ok(profile)
    }

    /// Drops the stored profile; the income book stays on disk
    pub async fn logout(&self) -> AuthResult<()> {
        self.db.clear_profile().await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.db.get_profile().await?.is_authenticated())
    }

    pub async fn state(&self) -> AuthResult<SessionState> {
        Ok(SessionState::of(&self.db.get_profile().await?))
    }

    /// Profile of a signed-in user, or `NotAuthenticated`
    pub async fn require_authenticated(&self) -> AuthResult<UserProfile> {
        let profile = self.db.get_profile().await?;
        if !profile.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(profile)
    }

    /// Profile of a signed-in, onboarded user
    pub async fn require_ready(&self) -> AuthResult<UserProfile> {
        let profile = self.require_authenticated().await?;
        if !profile.is_onboarded {
            return Err(AuthError::NotOnboarded);
        }
        Ok(profile)
    }

    /// Stores the group, rate and employee answers and marks the profile onboarded
    pub async fn complete_onboarding(&self, input: OnboardingInput) -> AuthResult<UserProfile> {
        let profile = self.require_authenticated().await?;
        validate_onboarding(&input)?;

        let profile = UserProfile {
            group: input.group,
            tax_rate: input.effective_tax_rate(),
            has_employees: input.has_employees,
            is_onboarded: true,
            ..profile
        };
        self.db.save_profile(&profile).await?;
        info!("Onboarding complete: {}, rate {}", profile.group, profile.tax_rate);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxify_core::{FopGroup, TaxRate};
    use taxify_storage::MemoryBlobStore;

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_simulated_delay() {
        let db = TaxifyDb::new(MemoryBlobStore::new());
        let session = SessionManager::new(&db, Duration::from_millis(1500));

        let started = tokio::time::Instant::now();
        let profile = session
            .login_with_google(GoogleIdentity::default())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(profile.name, "Тарас Шевченко");
    }

    #[test]
    fn test_session_state_routing() {
        let mut profile = UserProfile::default();
        assert_eq!(SessionState::of(&profile), SessionState::LoggedOut);

        profile.email = Some("a@b.c".to_string());
        assert_eq!(SessionState::of(&profile), SessionState::NeedsOnboarding);

        profile.is_onboarded = true;
        profile.group = FopGroup::Group1;
        profile.tax_rate = TaxRate::Percent5;
        assert_eq!(SessionState::of(&profile), SessionState::Ready);
    }
}
