use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Delay between surfacing a session-expiry message and sending the user to login.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the CLI's session file; `None` means `$HOME/.config/institution/cli`.
    pub config_dir: Option<PathBuf>,
    /// Where recovery sends the user once the session is gone.
    pub login_entry: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),
    #[error("HOME environment variable not set")]
    MissingHome,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("INSTITUTION_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("INSTITUTION_API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("INSTITUTION_CLI_CONFIG_DIR") {
            self.session.config_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("INSTITUTION_LOGIN_ENTRY") {
            self.session.login_entry = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_secs: 60,
            },
            session: SessionConfig {
                config_dir: None,
                login_entry: "login.html".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://institution-backend.onrender.com/api".to_string(),
                timeout_secs: 30,
            },
            session: SessionConfig {
                config_dir: None,
                login_entry: "login.html".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://institution-backend-kkw8.onrender.com/api".to_string(),
                timeout_secs: 30,
            },
            session: SessionConfig {
                config_dir: None,
                login_entry: "login.html".to_string(),
            },
        }
    }
}

impl ApiConfig {
    /// Base URL checked for shape, with any trailing slash removed so paths concatenate cleanly.
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(self.base_url.clone(), e.to_string()))?;
        Ok(self.base_url.trim_end_matches('/').to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionConfig {
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.config_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let home = env::var("HOME").map_err(|_| ConfigError::MissingHome)?;
                Ok(PathBuf::from(home).join(".config").join("institution").join("cli"))
            }
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.session.login_entry, "login.html");
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let api = ApiConfig {
            base_url: "https://backend.example.com/api/".to_string(),
            timeout_secs: 5,
        };
        assert_eq!(api.normalized_base_url().unwrap(), "https://backend.example.com/api");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let api = ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(api.normalized_base_url(), Err(ConfigError::InvalidBaseUrl(..))));
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let session = SessionConfig {
            config_dir: Some(PathBuf::from("/tmp/institution-test")),
            login_entry: "login.html".to_string(),
        };
        assert_eq!(session.resolve_dir().unwrap(), PathBuf::from("/tmp/institution-test"));
    }
}
