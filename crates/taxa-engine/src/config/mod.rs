//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `TAXA_*` environment variables.
//! Malformed threshold values are rejected here, at startup, never discovered
//! mid-request.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::selection::SelectionConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TAXA_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `3000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the MiniLM model files. Absent means the embedder
    /// runs in stub mode (dev/CI only).
    pub model_path: Option<PathBuf>,

    /// Optional JSON file overriding the built-in taxonomy.
    pub taxonomy_path: Option<PathBuf>,

    /// Selection thresholds (each field individually overridable).
    pub selection: SelectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            taxonomy_path: None,
            selection: SelectionConfig::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "TAXA_PORT";
    const ENV_BIND_ADDR: &'static str = "TAXA_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "TAXA_MODEL_PATH";
    const ENV_TAXONOMY_PATH: &'static str = "TAXA_TAXONOMY_PATH";
    const ENV_MIN_SCORE: &'static str = "TAXA_MIN_SCORE";
    const ENV_SOFT_TOP_FLOOR: &'static str = "TAXA_SOFT_TOP_FLOOR";
    const ENV_SECOND_MIN_SCORE: &'static str = "TAXA_SECOND_MIN_SCORE";
    const ENV_SECOND_RATIO: &'static str = "TAXA_SECOND_RATIO";
    const ENV_MAX_LABELS: &'static str = "TAXA_MAX_LABELS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let taxonomy_path = Self::parse_optional_path_from_env(Self::ENV_TAXONOMY_PATH);

        let selection = SelectionConfig {
            min_score: Self::parse_f32_from_env(
                Self::ENV_MIN_SCORE,
                defaults.selection.min_score,
            )?,
            soft_top_floor: Self::parse_f32_from_env(
                Self::ENV_SOFT_TOP_FLOOR,
                defaults.selection.soft_top_floor,
            )?,
            second_min_score: Self::parse_f32_from_env(
                Self::ENV_SECOND_MIN_SCORE,
                defaults.selection.second_min_score,
            )?,
            second_ratio: Self::parse_f32_from_env(
                Self::ENV_SECOND_RATIO,
                defaults.selection.second_ratio,
            )?,
            max_labels: Self::parse_usize_from_env(
                Self::ENV_MAX_LABELS,
                defaults.selection.max_labels,
            )?,
        };

        Ok(Self {
            port,
            bind_addr,
            model_path,
            taxonomy_path,
            selection,
        })
    }

    /// Validates paths and threshold invariants (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.taxonomy_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        self.selection.validate()?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::FloatParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::IntParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
