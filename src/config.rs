use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub edit_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
    /// Key taken from the environment; only used when the credential store is empty.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub credential_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_base = non_empty_env("TITAN_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let edit_model = non_empty_env("TITAN_EDIT_MODEL").unwrap_or(defaults.edit_model);
        let image_model = non_empty_env("TITAN_IMAGE_MODEL").unwrap_or(defaults.image_model);
        let request_timeout_secs = non_empty_env("TITAN_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);
        let api_key = non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"));

        GeminiConfig {
            api_base,
            edit_model,
            image_model,
            request_timeout_secs,
            api_key,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_models(mut self, edit_model: impl Into<String>, image_model: impl Into<String>) -> Self {
        self.edit_model = edit_model.into();
        self.image_model = image_model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            credential_path: None,
            log_level: None,
            log_json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let credential_path = non_empty_env("TITAN_CREDENTIAL_PATH").map(PathBuf::from);
        let log_level = non_empty_env("TITAN_LOG_LEVEL");
        let log_json = env::var("TITAN_LOG_JSON").ok().map_or(false, |val| val == "true");

        Config {
            gemini: GeminiConfig::from_env(),
            credential_path,
            log_level,
            log_json,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Explicit path if set, else `<config_dir>/titan-ai/credentials.json`.
    pub fn credential_path(&self) -> Option<PathBuf> {
        self.credential_path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("titan-ai").join("credentials.json"))
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.edit_model, "gemini-2.5-flash-image");
        assert_eq!(config.image_model, "imagen-4.0-generate-001");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_builders() {
        let config = GeminiConfig::new()
            .with_api_base("http://localhost:9000/v1beta/")
            .with_models("edit-x", "image-y")
            .with_timeout(5);
        assert_eq!(config.api_base, "http://localhost:9000/v1beta");
        assert_eq!(config.edit_model, "edit-x");
        assert_eq!(config.image_model, "image-y");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_explicit_credential_path_wins() {
        let config = Config::new().with_credential_path("/tmp/titan/creds.json");
        assert_eq!(
            config.credential_path(),
            Some(PathBuf::from("/tmp/titan/creds.json"))
        );
    }
}
