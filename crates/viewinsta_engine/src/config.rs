use std::fmt;

use thiserror::Error;

/// Environment variable holding the image edit service credential.
pub const API_KEY_VAR: &str = "API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set.")]
    MissingCredential,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Credential for the image edit service. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(Self(value))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Result<Self, ConfigError> {
        lookup(API_KEY_VAR).map_or(Err(ConfigError::MissingCredential), Self::new)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_key_is_fatal() {
        assert!(matches!(
            ApiKey::from_lookup(|_| None),
            Err(ConfigError::MissingCredential)
        ));
        assert!(matches!(
            ApiKey::from_lookup(|_| Some("  ".to_string())),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn key_is_read_from_api_key_var() {
        let key = ApiKey::from_lookup(|name| {
            assert_eq!(name, "API_KEY");
            Some("secret".to_string())
        })
        .unwrap();
        assert_eq!(key.expose(), "secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn missing_key_message() {
        assert_eq!(
            ConfigError::MissingCredential.to_string(),
            "API_KEY environment variable not set."
        );
    }
}
