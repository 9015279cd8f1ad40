//! Service configuration from the environment

use std::time::Duration;
use thiserror::Error;
use webpush_aesgcm::{ConfigError, KeyMaterialConfig};

/// Delivery deadline in milliseconds
pub const ENV_DEADLINE_MS: &str = "WEBPUSH_DEADLINE_MS";
/// Path of a JSON key material file, preferred over individual key variables
pub const ENV_CONFIG: &str = "WEBPUSH_CONFIG";

/// Slightly under the 30 s a notification host typically allows
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(25_000);

#[derive(Debug, Error)]
pub enum ServiceConfigError {
    #[error(transparent)]
    Keys(#[from] ConfigError),

    #[error("invalid {name}: {value:?}")]
    InvalidDeadline { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub keys: KeyMaterialConfig,
    pub deadline: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ServiceConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys = match lookup(ENV_CONFIG) {
            Some(path) => KeyMaterialConfig::from_json_file(path)?,
            None => KeyMaterialConfig::from_lookup(&lookup)?,
        };

        let deadline = match lookup(ENV_DEADLINE_MS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or(ServiceConfigError::InvalidDeadline {
                    name: ENV_DEADLINE_MS,
                    value,
                })?,
            None => DEFAULT_DEADLINE,
        };

        Ok(Self { keys, deadline })
    }
}
