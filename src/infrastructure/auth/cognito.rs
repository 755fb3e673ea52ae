#[cfg(test)]
#[path = "cognito_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use super::jwt::decode_claims;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiError;
use crate::domain::models::CredentialProvider;

/// Tokens are refreshed this many seconds before they expire.
const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp in seconds.
    pub expires_at: i64,
}

impl StoredTokens {
    fn is_fresh(&self) -> bool {
        return self.expires_at - EXPIRY_LEEWAY_SECS > Utc::now().timestamp();
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest {
    auth_flow: String,
    client_id: String,
    auth_parameters: HashMap<String, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GlobalSignOutRequest {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    expires_in: i64,
    id_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CognitoErrorResponse {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// JSON file holding the tokens of the signed in user.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> CredentialStore {
        return CredentialStore { path };
    }

    pub async fn load(&self) -> Result<Option<StoredTokens>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        return Ok(Some(serde_json::from_str::<StoredTokens>(&content)?));
    }

    pub async fn save(&self, tokens: &StoredTokens) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(tokens)?).await?;

        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }

        return Ok(());
    }
}

/// Region prefix of a user pool ID such as `eu-central-1_AbCdEf`.
pub fn pool_region(user_pool_id: &str) -> Option<String> {
    let (region, id) = user_pool_id.trim().split_once('_')?;
    if region.is_empty() || id.is_empty() {
        return None;
    }

    return Some(region.to_string());
}

/// Signs in against a Cognito user pool and hands out its ID token.
pub struct Cognito {
    endpoint: String,
    client_id: String,
    store: CredentialStore,
    cached: Mutex<Option<StoredTokens>>,
}

impl Cognito {
    pub fn new(endpoint: &str, client_id: &str, store: CredentialStore) -> Cognito {
        return Cognito {
            endpoint: endpoint.to_string(),
            client_id: client_id.to_string(),
            store,
            cached: Mutex::new(None),
        };
    }

    /// The user pool's region wins over `api-region`, pool IDs are
    /// `{region}_{id}`.
    pub fn from_config() -> Cognito {
        let region = pool_region(&Config::get(ConfigKey::UserPoolID))
            .unwrap_or_else(|| return Config::get(ConfigKey::ApiRegion));
        let endpoint = format!("https://cognito-idp.{region}.amazonaws.com/");

        return Cognito::new(
            &endpoint,
            &Config::get(ConfigKey::UserPoolClientID),
            CredentialStore::new(PathBuf::from(Config::get(ConfigKey::CredentialsFile))),
        );
    }

    async fn call<T: serde::Serialize + ?Sized>(
        &self,
        target: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        let res = reqwest::Client::new()
            .post(&self.endpoint)
            .header("Content-Type", "application/x-amz-json-1.1")
            .header(
                "X-Amz-Target",
                format!("AWSCognitoIdentityProviderService.{target}"),
            )
            .json(body)
            .send()
            .await?;

        let status = res.status().as_u16();
        if status >= 400 {
            let text = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CognitoErrorResponse>(&text)
                .map(|e| return format!("{}: {}", e.error_type, e.message))
                .unwrap_or(text);
            tracing::error!(operation = target, status, error_message = %message, "User pool request failed");
            bail!(format!("Sign in failed ({status}) {message}"));
        }

        return Ok(res);
    }

    async fn initiate_auth(
        &self,
        flow: &str,
        parameters: HashMap<String, String>,
    ) -> Result<AuthenticationResult> {
        if self.client_id.is_empty() {
            bail!("user-pool-client-id is not configured");
        }

        let req = InitiateAuthRequest {
            auth_flow: flow.to_string(),
            client_id: self.client_id.to_string(),
            auth_parameters: parameters,
        };

        let res = self
            .call("InitiateAuth", &req)
            .await?
            .json::<InitiateAuthResponse>()
            .await?;

        if let Some(challenge) = res.challenge_name {
            bail!(format!(
                "The user pool asked for the {challenge} challenge, which is not supported. Finish signing up in the web client first."
            ));
        }

        match res.authentication_result {
            Some(result) => return Ok(result),
            None => bail!("The user pool returned no tokens"),
        }
    }

    fn to_stored(result: AuthenticationResult, previous_refresh: Option<String>) -> StoredTokens {
        let expires_at = decode_claims(&result.id_token)
            .ok()
            .and_then(|e| return e.exp)
            .unwrap_or_else(|| return Utc::now().timestamp() + result.expires_in);

        return StoredTokens {
            id_token: result.id_token,
            access_token: result.access_token,
            refresh_token: result.refresh_token.or(previous_refresh),
            expires_at,
        };
    }

    /// `USER_PASSWORD_AUTH` sign in. The tokens are cached in the
    /// credentials file.
    pub async fn login(&self, username: &str, password: &str) -> Result<StoredTokens> {
        let parameters = HashMap::from([
            ("USERNAME".to_string(), username.to_string()),
            ("PASSWORD".to_string(), password.to_string()),
        ]);

        let result = self.initiate_auth("USER_PASSWORD_AUTH", parameters).await?;
        let tokens = Cognito::to_stored(result, None);
        self.store.save(&tokens).await?;
        *self.cached.lock().await = Some(tokens.clone());

        tracing::info!(username, "Signed in");
        return Ok(tokens);
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredTokens> {
        let parameters = HashMap::from([(
            "REFRESH_TOKEN".to_string(),
            refresh_token.to_string(),
        )]);

        let result = self.initiate_auth("REFRESH_TOKEN_AUTH", parameters).await?;
        let tokens = Cognito::to_stored(result, Some(refresh_token.to_string()));
        self.store.save(&tokens).await?;

        tracing::debug!("Refreshed tokens");
        return Ok(tokens);
    }

    async fn current_tokens(&self) -> Result<Option<StoredTokens>> {
        let mut cached = self.cached.lock().await;
        if cached.is_none() {
            *cached = self.store.load().await?;
        }

        let tokens = match cached.as_ref() {
            Some(tokens) => tokens.clone(),
            None => return Ok(None),
        };
        if tokens.is_fresh() {
            return Ok(Some(tokens));
        }

        let refresh_token = match &tokens.refresh_token {
            Some(refresh_token) => refresh_token.to_string(),
            None => return Ok(None),
        };

        let refreshed = self.refresh(&refresh_token).await?;
        *cached = Some(refreshed.clone());

        return Ok(Some(refreshed));
    }
}

#[async_trait]
impl CredentialProvider for Cognito {
    #[allow(clippy::implicit_return)]
    async fn token(&self) -> Result<String, ApiError> {
        match self.current_tokens().await {
            Ok(Some(tokens)) => return Ok(tokens.id_token),
            Ok(None) => {
                return Err(ApiError::Unauthenticated(
                    "no valid session found".to_string(),
                ));
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to obtain a token");
                return Err(ApiError::Unauthenticated(err.to_string()));
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn user_email(&self) -> Option<String> {
        let tokens = self.current_tokens().await.ok()??;
        return decode_claims(&tokens.id_token).ok()?.email;
    }

    #[allow(clippy::implicit_return)]
    async fn sign_out(&self) -> Result<()> {
        // Held until the file is gone so `token()` cannot reload it.
        let mut cached = self.cached.lock().await;
        let tokens = match cached.take() {
            Some(tokens) => Some(tokens),
            None => self.store.load().await.unwrap_or(None),
        };
        self.store.clear().await?;
        drop(cached);
        tracing::info!("Signed out");

        if let Some(tokens) = tokens {
            let req = GlobalSignOutRequest {
                access_token: tokens.access_token,
            };
            if let Err(err) = self.call("GlobalSignOut", &req).await {
                tracing::warn!(error = ?err, "Failed to revoke tokens, they were cleared locally");
            }
        }

        return Ok(());
    }
}
