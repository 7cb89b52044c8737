//! Runtime configuration.
//!
//! Layers, later wins: built-in defaults, YAML file, environment (with `.env`
//! loaded through `dotenvy`), then whatever the CLI overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NotedeskError, Result};
use crate::session::{Role, UserSession};

pub const CONFIG_DIR: &str = ".notedesk";
pub const CONFIG_FILE: &str = "config.yaml";
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

pub const ENV_API_URL: &str = "NOTEDESK_API_URL";
pub const ENV_STORAGE: &str = "NOTEDESK_STORAGE";
pub const ENV_USER_ID: &str = "NOTEDESK_USER_ID";
pub const ENV_ROLE: &str = "NOTEDESK_ROLE";
pub const ENV_API_TOKEN: &str = "NOTEDESK_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "NOTEDESK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the `/notes` endpoints hang off
    pub api_base_url: String,
    /// File standing in for browser local storage
    pub storage_path: PathBuf,
    pub user_id: Option<String>,
    pub role: Role,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            storage_path: Path::new(CONFIG_DIR).join(LOCAL_STORAGE_FILE),
            user_id: None,
            role: Role::default(),
            api_token: None,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load defaults, then `path` (or `.notedesk/config.yaml` when present),
    /// then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(CONFIG_DIR).join(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(path) = get(ENV_STORAGE) {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(user) = get(ENV_USER_ID) {
            self.user_id = Some(user);
        }
        if let Some(role) = get(ENV_ROLE) {
            self.role = role.parse().map_err(NotedeskError::Config)?;
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                NotedeskError::Config(format!("{} must be a number, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        Ok(())
    }

    pub fn session(&self) -> UserSession {
        UserSession {
            user_id: self.user_id.clone(),
            role: self.role,
        }
    }
}
