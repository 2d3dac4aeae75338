use std::{env, path::Path};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_API_KEY_FILE: &str = "api_key.txt";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub anthropic_api_key: SecretString,
    pub anthropic_api_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "compass".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            anthropic_api_key: SecretString::from(load_api_key()),
            anthropic_api_url: env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
            llm_max_tokens: env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(4096),
        }
    }

    /// Rejects configuration the server cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.anthropic_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(
                "No API key found. Set ANTHROPIC_API_KEY or provide ANTHROPIC_API_KEY_FILE"
                    .to_string(),
            ));
        }

        if self.llm_max_tokens == 0 {
            return Err(AppError::ConfigError(
                "LLM_MAX_TOKENS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "compass-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            anthropic_api_key: SecretString::from("test_api_key".to_string()),
            anthropic_api_url: "http://localhost:9999".to_string(),
            llm_model: "test-model".to_string(),
            llm_max_tokens: 1024,
        }
    }
}

/// The key comes from `ANTHROPIC_API_KEY`, falling back to the contents of
/// the file named by `ANTHROPIC_API_KEY_FILE`.
fn load_api_key() -> String {
    if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
        return key.trim().to_string();
    }

    let key_file =
        env::var("ANTHROPIC_API_KEY_FILE").unwrap_or_else(|_| DEFAULT_API_KEY_FILE.to_string());
    read_key_file(Path::new(&key_file)).unwrap_or_default()
}

fn read_key_file(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents.trim().to_string()),
        Err(err) => {
            log::warn!("Could not read API key file {}: {}", path.display(), err);
            None
        }
    }
}
