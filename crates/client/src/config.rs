use std::time::Duration;

/// Errors raised while reading client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Backend client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the resource paths are appended to.
    pub api_url: String,
    /// Base URL stored document filenames are resolved against.
    pub file_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".into(),
            file_base_url: "http://localhost:8080/uploads/".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                          |
    /// |------------------------------|----------------------------------|
    /// | `HRMS_API_URL`               | `http://localhost:8080/api`      |
    /// | `HRMS_FILE_BASE_URL`         | `http://localhost:8080/uploads/` |
    /// | `HRMS_REQUEST_TIMEOUT_SECS`  | `30`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("HRMS_API_URL").unwrap_or(defaults.api_url);
        let file_base_url = lookup("HRMS_FILE_BASE_URL").unwrap_or(defaults.file_base_url);

        let request_timeout_secs = match lookup("HRMS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "HRMS_REQUEST_TIMEOUT_SECS",
                expected: "number of seconds",
                value: raw.clone(),
            })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            api_url,
            file_base_url,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
