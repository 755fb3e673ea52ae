use anyhow::Result;

use super::check_user_pool_region;
use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());
    assert!(res.contains("# api-url = \"\""));
    assert!(res.contains("api-region = \"us-east-1\""));
    assert!(!res.contains("token"));
}

#[test]
fn it_names_config_keys_in_kebab_case() {
    assert_eq!(ConfigKey::ApiURL.to_string(), "api-url");
    assert_eq!(ConfigKey::UserPoolClientID.to_string(), "user-pool-client-id");
    assert_eq!(ConfigKey::CredentialsFile.to_string(), "credentials-file");
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "docchat",
        "documents",
        "list",
        "-c",
        "./config.example.toml",
    ])?;
    Config::load(cli::matches_chain(&matches)).await?;

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "docchat",
        "documents",
        "list",
        "-c",
        "./test/bad-config.toml",
    ])?;
    let res = Config::load(cli::matches_chain(&matches)).await;
    assert!(res.is_err());

    return Ok(());
}

#[test]
fn it_checks_the_user_pool_region() {
    assert!(check_user_pool_region("eu-central-1", "eu-central-1_EXAMPLE").is_ok());
    assert!(check_user_pool_region("us-east-1", "").is_ok());
    assert!(check_user_pool_region("us-east-1", "eu-central-1_EXAMPLE").is_err());
}
