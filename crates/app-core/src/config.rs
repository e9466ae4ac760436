//! Configuration management for the client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default local development API URL (reachable from a device on the same
/// network, so an IP rather than localhost).
pub const DEFAULT_LOCAL_API_URL: &str = "http://192.168.15.14:8080";

/// Default hosted API URL.
pub const DEFAULT_HOSTED_API_URL: &str =
    "https://ong-a2hzbucweddredb7.brazilsouth-01.azurewebsites.net";

/// Custom URI scheme registered for the OAuth2 redirect.
pub const DEFAULT_REDIRECT_SCHEME: &str = "voluntariosprobem";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// When true, talk to the local development endpoint instead of the
    /// hosted one.
    #[serde(default)]
    pub use_local: bool,
    /// Local development API URL.
    #[serde(default = "default_local_api_url")]
    pub local_api_url: String,
    /// Hosted production API URL.
    #[serde(default = "default_hosted_api_url")]
    pub hosted_api_url: String,
    /// URI scheme the OAuth2 callback redirects to.
    #[serde(default = "default_redirect_scheme")]
    pub redirect_scheme: String,
}

fn default_local_api_url() -> String {
    DEFAULT_LOCAL_API_URL.to_string()
}

fn default_hosted_api_url() -> String {
    DEFAULT_HOSTED_API_URL.to_string()
}

fn default_redirect_scheme() -> String {
    DEFAULT_REDIRECT_SCHEME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            use_local: false,
            local_api_url: DEFAULT_LOCAL_API_URL.to_string(),
            hosted_api_url: DEFAULT_HOSTED_API_URL.to_string(),
            redirect_scheme: DEFAULT_REDIRECT_SCHEME.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file, falling back to defaults.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("PROBEM_LOG_LEVEL") {
            self.log_level = log_level;
        }
        if let Ok(use_local) = std::env::var("PROBEM_USE_LOCAL") {
            self.use_local = matches!(use_local.as_str(), "1" | "true" | "yes");
        }
    }

    /// The API URL currently selected by the local/hosted toggle.
    pub fn api_url(&self) -> &str {
        if self.use_local {
            &self.local_api_url
        } else {
            &self.hosted_api_url
        }
    }

    /// Get the selected API URL as a parsed URL.
    pub fn api_base(&self) -> CoreResult<Url> {
        Url::parse(self.api_url()).map_err(CoreError::from)
    }

    /// The browser entry point for the Google OAuth2 flow.
    pub fn google_auth_url(&self) -> String {
        format!("{}/oauth2/authorization/google?mobile=true", self.api_url())
    }

    /// The deep-link redirect URI the backend sends the browser back to.
    pub fn redirect_uri(&self) -> String {
        format!("{}://oauth2/callback", self.redirect_scheme)
    }
}
