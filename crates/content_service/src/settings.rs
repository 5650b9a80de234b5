//! Service settings read from the environment.
//!
//! The credential and secret key are required. Startup fails before the
//! listener is bound when either is missing.

use std::fmt;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

pub const TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const SECRET_KEY_VAR: &str = "DJANGO_SECRET_KEY";
pub const DEBUG_VAR: &str = "DJANGO_DEBUG";
pub const ADDR_VAR: &str = "CONTENT_SERVICE_ADDR";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Service settings.
#[derive(Clone)]
pub struct Settings {
    /// Credential for the hosting API.
    pub github_access_token: String,
    /// Application secret. Validated at startup; nothing signs with it yet.
    pub secret_key: String,
    /// Include upstream error text in error responses.
    pub debug: bool,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Hosting API base URL.
    pub github_api_url: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(SettingsError::Missing(name))
        };

        let github_access_token = required(TOKEN_VAR)?;
        let secret_key = required(SECRET_KEY_VAR)?;
        let debug = lookup(DEBUG_VAR).is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|_| SettingsError::Invalid {
            name: ADDR_VAR,
            value: addr.clone(),
        })?;

        let github_api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        match Url::parse(&github_api_url) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => {
                return Err(SettingsError::Invalid {
                    name: API_URL_VAR,
                    value: github_api_url,
                })
            }
        }

        Ok(Self {
            github_access_token,
            secret_key,
            debug,
            bind_addr,
            github_api_url,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("github_access_token", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("bind_addr", &self.bind_addr)
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [(TOKEN_VAR, "ghp_test"), (SECRET_KEY_VAR, "s3cret")];

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(settings.github_access_token, "ghp_test");
        assert_eq!(settings.secret_key, "s3cret");
        assert!(!settings.debug);
        assert_eq!(settings.bind_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(settings.github_api_url, "https://api.github.com");
    }

    #[test]
    fn test_missing_token_fails() {
        let err = Settings::from_lookup(lookup(&[(SECRET_KEY_VAR, "s3cret")])).unwrap_err();
        assert_eq!(err, SettingsError::Missing(TOKEN_VAR));
        assert_eq!(err.to_string(), "GITHUB_ACCESS_TOKEN must be set");
    }

    #[test]
    fn test_empty_secret_fails() {
        let err = Settings::from_lookup(lookup(&[(TOKEN_VAR, "ghp_test"), (SECRET_KEY_VAR, " ")])).unwrap_err();
        assert_eq!(err, SettingsError::Missing(SECRET_KEY_VAR));
    }

    #[test]
    fn test_debug_flag() {
        for (value, expected) in [("true", true), ("True", true), ("TRUE", true), ("1", false), ("false", false)] {
            let mut vars = REQUIRED.to_vec();
            vars.push((DEBUG_VAR, value));
            assert_eq!(Settings::from_lookup(lookup(&vars)).unwrap().debug, expected, "{value}");
        }
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push((ADDR_VAR, "localhost"));
        assert!(matches!(
            Settings::from_lookup(lookup(&vars)),
            Err(SettingsError::Invalid { name: ADDR_VAR, .. })
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push((API_URL_VAR, "not a url"));
        assert!(matches!(
            Settings::from_lookup(lookup(&vars)),
            Err(SettingsError::Invalid { name: API_URL_VAR, .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let settings = Settings::from_lookup(lookup(&REQUIRED)).unwrap();
        let printed = format!("{settings:?}");

        assert!(!printed.contains("ghp_test"));
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }
}
