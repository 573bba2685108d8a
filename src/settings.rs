use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::{
        availability::{
            ProbePolicy,
            RetryPolicy,
        },
        game::DEFAULT_MAX_ATTEMPTS,
        Directory,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const API_URL_ENV: &str = "TAXACARDS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub availability: RetryPolicy,
    pub probe_policy: ProbePolicy,
    pub max_incorrect_attempts: u32,
    pub keep_alive_minutes: u64,
    pub default_directory: Directory,
    /// Taken from the environment for this run only, never written to disk.
    #[serde(skip)]
    pub(crate) api_url_override: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            availability: RetryPolicy::default(),
            probe_policy: ProbePolicy::default(),
            max_incorrect_attempts: DEFAULT_MAX_ATTEMPTS,
            keep_alive_minutes: 14,
            default_directory: Directory::default(),
            api_url_override: None,
        }
    }
}

impl Settings {
    /// Saved settings plus the environment override. Falls back to defaults
    /// when the saved file does not validate.
    pub fn load() -> Self {
        let saved = load_json_or_default::<Settings>(SETTINGS_FILE);
        Self::resolve(saved, std::env::var(API_URL_ENV).ok())
    }

    pub fn resolve(saved: Settings, env_api_url: Option<String>) -> Self {
        match saved.validate() {
            Ok(()) => saved.with_env_override(env_api_url),
            Err(e) => {
                log::warn!("Saved settings are invalid ({}), using defaults", e);
                Settings::default().with_env_override(env_api_url)
            }
        }
    }

    pub fn save(&self) -> Result<(), crate::core::QuizError> {
        save_json(self, SETTINGS_FILE)
    }

    pub fn with_env_override(mut self, api_url: Option<String>) -> Self {
        let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) else {
            return self;
        };

        match check_api_url(&url) {
            Ok(()) => {
                log::info!("Using API URL from {}: {}", API_URL_ENV, url);
                self.api_url_override = Some(url);
            }
            Err(e) => log::warn!("Ignoring {}: {}", API_URL_ENV, e),
        }
        self
    }

    /// The backend address in effect: the environment override if set,
    /// otherwise the saved one.
    pub fn api_url(&self) -> &str {
        self.api_url_override.as_deref().unwrap_or(&self.api_base_url)
    }

    pub fn api_url_override(&self) -> Option<&str> {
        self.api_url_override.as_deref()
    }

    pub fn validate(&self) -> Result<(), String> {
        check_api_url(&self.api_base_url)?;
        if self.availability.max_attempts == 0 {
            return Err("Server check needs at least one attempt".to_string());
        }
        if self.max_incorrect_attempts == 0 {
            return Err("Allowed guesses must be at least 1".to_string());
        }
        if self.keep_alive_minutes == 0 {
            return Err("Keep-alive interval must be at least one minute".to_string());
        }
        Ok(())
    }
}

/// Accepts only absolute http(s) URLs with a host, in the trimmed form the
/// HTTP client uses.
pub fn check_api_url(url: &str) -> Result<(), String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err("API URL must not be empty".to_string());
    }

    let parsed = Url::parse(url).map_err(|e| format!("API URL is not valid: {}", e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("API URL must start with http:// or https://".to_string());
    }
    if !parsed.host_str().is_some_and(|host| !host.is_empty()) {
        return Err("API URL must include a host".to_string());
    }
    Ok(())
}
