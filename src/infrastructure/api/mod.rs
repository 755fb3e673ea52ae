pub mod rest;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiBox;
use crate::domain::models::AuthSession;

pub struct ApiManager {}

impl ApiManager {
    pub fn get(session: AuthSession) -> Result<ApiBox> {
        let url = Config::get(ConfigKey::ApiURL);
        if url.is_empty() {
            bail!("api-url is not configured. Set it in the config file, with --api-url or DOCCHAT_API_URL.");
        }

        return Ok(Arc::new(rest::RestApi::new(&url, session)));
    }
}
