use std::env;

use anyhow::{bail, Result};

/// Process configuration, resolved once at startup and handed to the
/// studio read-only. The API key comes from the environment (or a .env
/// file loaded by the binary) and is never looked up again after load.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub edit_model: String,
    pub generation_model: String,
    pub generation_size: String,
    pub generation_quality: String,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let openai_api_key = env::var("API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        if openai_api_key.trim().is_empty() {
            bail!("API_KEY is not set; generation requires an OpenAI API key");
        }

        Ok(Self {
            openai_api_key,
            openai_base_url: env_string("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            edit_model: env_string("EDIT_MODEL", "gpt-image-1-mini"),
            generation_model: env_string("GENERATION_MODEL", "dall-e-3"),
            generation_size: env_string("GENERATION_SIZE", "1024x1024"),
            generation_quality: env_string("GENERATION_QUALITY", "standard"),
            log_level: env_string("LOG_LEVEL", "info"),
        })
    }
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
