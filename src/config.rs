//! Environment-supplied configuration.
//!
//! Secrets and the team selection come from the environment only; there is
//! no config file. Both the token and the team name are mandatory — if
//! either is missing the run aborts before any export work.

use std::env;

use thiserror::Error;
use tracing::{error, info};

pub const TOKEN_VAR: &str = "POSTBAK_ACCESS_TOKEN";
pub const TEAM_VAR: &str = "POSTBAK_TEAM_NAME";
/// Optional override for self-hosted instances and tests.
pub const BASE_URL_VAR: &str = "POSTBAK_BASE_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub team_name: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = require(TOKEN_VAR)?;
        let team_name = require(TEAM_VAR)?;
        let base_url = env::var(BASE_URL_VAR).ok().filter(|v| !v.is_empty());

        info!(
            team = %team_name,
            base_url = base_url.as_deref().unwrap_or("<default>"),
            "configuration loaded from environment"
        );

        Ok(Config {
            access_token,
            team_name,
            base_url,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name).ok().filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => {
            error!(var = name, "required environment variable not set");
            Err(ConfigError::Missing(name))
        }
    }
}
