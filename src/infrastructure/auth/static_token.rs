#[cfg(test)]
#[path = "static_token_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::jwt::decode_claims;
use crate::domain::models::ApiError;
use crate::domain::models::CredentialProvider;

/// A bearer token handed in through `--token` or `DOCCHAT_TOKEN`.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: &str) -> StaticToken {
        return StaticToken {
            token: token.trim().to_string(),
        };
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    #[allow(clippy::implicit_return)]
    async fn token(&self) -> Result<String, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::Unauthenticated(
                "no token configured".to_string(),
            ));
        }

        return Ok(self.token.to_string());
    }

    #[allow(clippy::implicit_return)]
    async fn user_email(&self) -> Option<String> {
        return decode_claims(&self.token).ok().and_then(|e| return e.email);
    }

    #[allow(clippy::implicit_return)]
    async fn sign_out(&self) -> Result<()> {
        tracing::warn!("Sign out requested while a static token is configured");
        bail!("A static token is configured, unset --token or DOCCHAT_TOKEN to sign out.");
    }
}
