use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::ApiError;

pub type CredentialsBox = Arc<dyn CredentialProvider + Send + Sync>;

#[async_trait]
pub trait CredentialProvider {
    /// Returns a bearer token for the next API call. Fails with
    /// `ApiError::Unauthenticated` when no valid token can be obtained, in
    /// which case no request must be sent.
    async fn token(&self) -> Result<String, ApiError>;

    /// Email of the signed in user, used for display only.
    async fn user_email(&self) -> Option<String>;

    /// Invalidates the local session.
    async fn sign_out(&self) -> Result<()>;
}

/// Authentication context shared by everything that talks to the backend.
/// Created once at startup and handed to each component explicitly.
#[derive(Clone)]
pub struct AuthSession {
    pub credentials: CredentialsBox,
    pub user_email: Option<String>,
}

impl AuthSession {
    pub async fn start(credentials: CredentialsBox) -> AuthSession {
        let user_email = credentials.user_email().await;
        return AuthSession {
            credentials,
            user_email,
        };
    }

    pub async fn token(&self) -> Result<String, ApiError> {
        return self.credentials.token().await;
    }

    pub async fn sign_out(&self) -> Result<()> {
        return self.credentials.sign_out().await;
    }
}
