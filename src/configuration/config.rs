#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiRegion,
    ApiURL,
    ConfigFile,
    CredentialsFile,
    Token,
    UserPoolClientID,
    UserPoolID,
}

pub struct Config {}

/// User pool IDs are prefixed with the region they live in.
pub fn check_user_pool_region(region: &str, user_pool_id: &str) -> Result<()> {
    if let Some((pool_region, _)) = user_pool_id.split_once('_') {
        if !pool_region.is_empty() && pool_region != region {
            bail!(format!(
                "user-pool-id '{user_pool_id}' belongs to region '{pool_region}' but api-region is '{region}'"
            ));
        }
    }

    return Ok(());
}

fn config_dir() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let dir = dirs::config_dir().unwrap_or_else(env::temp_dir);
    #[cfg(target_os = "macos")]
    let dir = env::var("HOME")
        .map(|home| return path::PathBuf::from(home).join(".config"))
        .unwrap_or_else(|_| return env::temp_dir());

    return dir.join("docchat");
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = config_dir().join("config.toml");
        let credentials_path = config_dir().join("credentials.json");

        let res = match key {
            ConfigKey::ApiRegion => "us-east-1",
            ConfigKey::ApiURL => "",
            ConfigKey::UserPoolClientID => "",
            ConfigKey::UserPoolID => "",

            // Special
            ConfigKey::ConfigFile => config_path.to_str().unwrap_or_default(),
            ConfigKey::CredentialsFile => credentials_path.to_str().unwrap_or_default(),
            ConfigKey::Token => "",
        };

        return res.to_string();
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}', expected a string"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        let api_url = Config::get(ConfigKey::ApiURL);
        if !api_url.is_empty() && !api_url.starts_with("http://") && !api_url.starts_with("https://")
        {
            bail!(format!("api-url must be an http(s) URL, got '{api_url}'"));
        }

        check_user_pool_region(
            &Config::get(ConfigKey::ApiRegion),
            &Config::get(ConfigKey::UserPoolID),
        )?;

        tracing::debug!(
            api_url = %Config::get(ConfigKey::ApiURL),
            api_region = %Config::get(ConfigKey::ApiRegion),
            user_pool_id = %Config::get(ConfigKey::UserPoolID),
            credentials_file = %Config::get(ConfigKey::CredentialsFile),
            static_token = !Config::get(ConfigKey::Token).is_empty(),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile || key == ConfigKey::Token {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|e| return e.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
