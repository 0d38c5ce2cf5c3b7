use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::app::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Title given to a page whose plan doesn't set one.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Whether the editor asks the suggestion service automatically.
    #[serde(default = "default_auto_suggest")]
    pub auto_suggest: bool,

    /// Suggestion service API key. When unset, the API_KEY environment
    /// variable is consulted instead.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_title() -> String {
    "My Generated Website".to_string()
}

fn default_auto_suggest() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            auto_suggest: default_auto_suggest(),
            api_key: None,
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BuilderSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("pagesmith");
        path.push("settings.json");
        path
    }

    /// The API key to use for suggestion requests: the configured value, or
    /// the API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("API_KEY").ok().filter(|k| !k.is_empty()))
    }
}
