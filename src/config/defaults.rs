//! Default configuration values
//!
//! This module provides default values for configuration options.
//! It is designed to be a single source of truth for defaults,
//! making it easier to maintain consistent defaults across the application.

use std::path::PathBuf;

use super::DeviceStrategy;

/// Environment variable prefix for all configuration options
pub const ENV_PREFIX: &str = "OS_PROXY_";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// String constants for default values

/// Default network device as string
///
/// "Wi-Fi" is the service name macOS assigns to the wireless adapter;
/// wired machines typically use "Built-In Ethernet" instead.
pub const DEFAULT_DEVICE_STR: &str = "Wi-Fi";

/// Default log level as string
pub const LOG_LEVEL_STR: &str = "info";

// Functions for default values

/// Default network device
pub fn default_device() -> String {
    DEFAULT_DEVICE_STR.to_string()
}

/// Default device resolution strategy
pub fn device_strategy() -> DeviceStrategy {
    DeviceStrategy::Static
}

/// Default log level
pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}

/// Default watch paths (empty means the platform's preferences store)
pub fn watch_paths() -> Vec<PathBuf> {
    Vec::new()
}
