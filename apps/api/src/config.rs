use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client;
use crate::reddit::{self, RedditCredentials};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub reddit: RedditCredentials,
    pub reddit_auth_url: String,
    pub reddit_api_url: String,
    /// Directory that rendered persona reports are written to.
    pub output_dir: PathBuf,
    /// Custom report template; the built-in template is used when unset.
    pub template_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            openrouter_api_key: require("OPENROUTER_API_KEY")?,
            openrouter_base_url: or_default("OPENROUTER_BASE_URL", llm_client::DEFAULT_BASE_URL),
            reddit: RedditCredentials {
                client_id: require("REDDIT_CLIENT_ID")?,
                client_secret: require("REDDIT_CLIENT_SECRET")?,
                username: require("REDDIT_USERNAME")?,
                password: require("REDDIT_PASSWORD")?,
                user_agent: require("REDDIT_USER_AGENT")?,
            },
            reddit_auth_url: or_default("REDDIT_AUTH_URL", reddit::DEFAULT_AUTH_URL),
            reddit_api_url: or_default("REDDIT_API_URL", reddit::DEFAULT_API_URL),
            output_dir: PathBuf::from(or_default("PERSONA_OUTPUT_DIR", "personas")),
            template_path: lookup("PERSONA_TEMPLATE_PATH").map(PathBuf::from),
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}
