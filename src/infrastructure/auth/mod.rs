pub mod cognito;
pub mod jwt;
pub mod static_token;

use std::sync::Arc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CredentialsBox;

pub struct AuthManager {}

impl AuthManager {
    /// A configured static token wins over the user pool session.
    pub fn get() -> CredentialsBox {
        let token = Config::get(ConfigKey::Token);
        if !token.is_empty() {
            tracing::debug!("Using static token");
            return Arc::new(static_token::StaticToken::new(&token));
        }

        return Arc::new(cognito::Cognito::from_config());
    }
}
