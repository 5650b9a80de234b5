//! Shell configuration.

use crate::user_agent;
use networking::ClientConfig;
use std::time::Duration;
use thiserror::Error;
use ui::ShellSettings;
use url::Url;

/// Environment variable naming the content service base URL.
pub const SERVICE_URL_VAR: &str = "CONTENT_SERVICE_URL";
/// Environment variable overriding the page new tabs open.
pub const HOME_PAGE_VAR: &str = "BROWSER_HOME_PAGE";

/// Configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a usable base URL: {value}")]
    InvalidServiceUrl { name: &'static str, value: String },
}

/// Shell configuration.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Base URL of the repository content service.
    pub service_url: String,
    /// Timeout for each listing request.
    pub request_timeout: Duration,
    /// Page loaded into new tabs.
    pub home_page: String,
    /// User agent string.
    pub user_agent: String,
}

impl ShellConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay the process environment on the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup` on the defaults. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(service_url) = get(SERVICE_URL_VAR) {
            config = config.with_service_url(&service_url)?;
        }
        if let Some(home_page) = get(HOME_PAGE_VAR) {
            config.home_page = home_page;
        }

        Ok(config)
    }

    /// Set the content service URL.
    pub fn with_service_url(mut self, service_url: &str) -> Result<Self, ConfigError> {
        match Url::parse(service_url) {
            Ok(url) if !url.cannot_be_a_base() => {
                self.service_url = service_url.to_string();
                Ok(self)
            }
            _ => Err(ConfigError::InvalidServiceUrl {
                name: SERVICE_URL_VAR,
                value: service_url.to_string(),
            }),
        }
    }

    /// Set the home page.
    pub fn with_home_page(mut self, home_page: &str) -> Self {
        self.home_page = home_page.to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Settings for the tab model.
    pub fn shell_settings(&self) -> ShellSettings {
        ShellSettings::default().with_home_page(self.home_page.clone())
    }

    /// Settings for the content service client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
            ..ClientConfig::default()
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(5),
            home_page: ShellSettings::default().home_page,
            user_agent: user_agent(),
        }
    }
}
