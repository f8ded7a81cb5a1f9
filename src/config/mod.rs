//! Configuration module
//!
//! This module handles application configuration, including loading from
//! different sources (files, environment variables, command line arguments)
//! and validating the configuration.

mod defaults;

pub use defaults::{DEFAULT_CONFIG_FILE, DEFAULT_DEVICE_STR, ENV_PREFIX, LOG_LEVEL_STR};

use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::{ProxyError, Result};

/// Device resolution strategy
///
/// Decides how the controller picks a network device when the caller
/// does not name one.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DeviceStrategy {
    /// Use the configured default device name
    Static,
    /// Query the platform for its preferred network service
    Discover,
}

// Custom deserialization implementation to make it case-insensitive
impl<'de> Deserialize<'de> for DeviceStrategy {
    #[inline]
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DeviceStrategy::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Default for DeviceStrategy {
    #[inline]
    fn default() -> Self {
        defaults::device_strategy()
    }
}

impl fmt::Display for DeviceStrategy {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Discover => write!(f, "discover"),
        }
    }
}

impl FromStr for DeviceStrategy {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "discover" => Ok(Self::Discover),
            _ => Err(ProxyError::Validation(format!(
                "Invalid device strategy: {}. Valid values are: static, discover",
                s
            ))),
        }
    }
}

/// Resolved application settings
///
/// Every field carries a concrete value; defaults are stated once in the
/// `defaults` submodule and the load order is defaults, then file, then
/// environment, then command line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Settings {
    /// Explicit device override; takes precedence over any strategy
    pub device: Option<String>,
    /// How to pick a device when none is given
    pub device_strategy: DeviceStrategy,
    /// Device used by the static strategy
    pub default_device: String,
    /// Log level
    pub log_level: String,
    /// Paths watched for configuration database changes; empty means the
    /// platform's preferences store
    pub watch_paths: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: None,
            device_strategy: defaults::device_strategy(),
            default_device: defaults::default_device(),
            log_level: defaults::log_level(),
            watch_paths: defaults::watch_paths(),
        }
    }
}

/// Partial settings loaded from a single source
///
/// Absent fields leave the current value untouched when merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    /// Explicit device override
    pub device: Option<String>,
    /// Device resolution strategy
    pub device_strategy: Option<DeviceStrategy>,
    /// Device used by the static strategy
    pub default_device: Option<String>,
    /// Log level
    pub log_level: Option<String>,
    /// Watch path overrides
    pub watch_paths: Option<Vec<PathBuf>>,
}

impl Overrides {
    /// Load overrides from a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        serde_json::from_str(&content).map_err(|e| {
            ProxyError::Parse(format!(
                "Failed to parse configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load overrides from `OS_PROXY_`-prefixed environment variables
    pub fn from_env() -> Result<Self> {
        let get_env = |name: &str| -> Option<String> {
            env::var(format!("{}{}", ENV_PREFIX, name)).ok()
        };

        let device_strategy = match get_env("DEVICE_STRATEGY") {
            Some(value) => Some(DeviceStrategy::from_str(&value)?),
            None => None,
        };

        Ok(Self {
            device: get_env("DEVICE"),
            device_strategy,
            default_device: get_env("DEFAULT_DEVICE"),
            log_level: get_env("LOG_LEVEL"),
            watch_paths: get_env("WATCH_PATHS")
                .map(|paths| paths.split(':').map(PathBuf::from).collect()),
        })
    }
}

impl Settings {
    /// Merge overrides into these settings
    ///
    /// Fields present in `overrides` replace the current values; the
    /// merged settings are returned.
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if let Some(device) = overrides.device {
            self.device = Some(device);
        }
        if let Some(strategy) = overrides.device_strategy {
            self.device_strategy = strategy;
        }
        if let Some(default_device) = overrides.default_device {
            self.default_device = default_device;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        if let Some(watch_paths) = overrides.watch_paths {
            self.watch_paths = watch_paths;
        }
        self
    }

    /// Validate the resolved settings
    pub fn validate(&self) -> Result<()> {
        if self.default_device.trim().is_empty() {
            return Err(ProxyError::Validation(
                "default_device must not be empty.".to_string(),
            ));
        }

        if let Some(device) = &self.device {
            if device.trim().is_empty() {
                return Err(ProxyError::Validation(
                    "device must not be empty when provided.".to_string(),
                ));
            }
        }

        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ProxyError::Validation(format!(
                "Invalid log level: {}. Valid values are: {}",
                self.log_level,
                LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
