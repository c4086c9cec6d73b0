//! Executor configuration.
//!
//! No timeout is configured; a caller that needs one races the boundary
//! call against its own timer.

/// Default cap on redirects followed per call.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Default cap on a buffered response body (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub const ENV_MAX_REDIRECTS: &str = "BRIDGE_MAX_REDIRECTS";
pub const ENV_MAX_BODY_BYTES: &str = "BRIDGE_MAX_BODY_BYTES";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the outbound HTTP agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub max_redirects: u32,
    pub max_body_bytes: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl HostConfig {
    /// Read overrides from `BRIDGE_MAX_REDIRECTS` and `BRIDGE_MAX_BODY_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_REDIRECTS) {
            config.max_redirects = parse_var(ENV_MAX_REDIRECTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_BODY_BYTES) {
            config.max_body_bytes = parse_var(ENV_MAX_BODY_BYTES, &raw)?;
        }
        Ok(config)
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
