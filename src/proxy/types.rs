//! Proxy configuration types
//!
//! This module contains the value types exchanged with the controller.

use serde::{Deserialize, Serialize};

/// A proxy configuration as reported by the operating system.
///
/// Every field is always populated: an unconfigured proxy reads back as
/// an empty hostname, port `0`, and `enabled: false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy hostname; empty when no host is configured
    pub hostname: String,
    /// Proxy port; `0` when no port is configured
    pub port: u16,
    /// Whether the proxy is currently turned on
    pub enabled: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: 0,
            enabled: false,
        }
    }
}

/// A request to write a new proxy configuration.
///
/// `hostname` and `port` are required for a set operation. `enabled` is
/// three-way: absent means "accept the platform's enable-on-write side
/// effect", `Some(false)` means "force the proxy off after the write",
/// and `Some(true)` is equivalent to absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyRequest {
    /// Target network device; resolved via the device strategy if absent
    pub device: Option<String>,
    /// Proxy hostname to store
    pub hostname: Option<String>,
    /// Proxy port to store
    pub port: Option<u16>,
    /// Requested on/off state after the write
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = ProxyConfig::default();
        assert_eq!(config.hostname, "");
        assert_eq!(config.port, 0);
        assert!(!config.enabled);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = ProxyConfig {
            hostname: "proxy.example.com".to_string(),
            port: 8080,
            enabled: true,
        };

        let json = serde_json::to_string(&config).expect("serialize");
        let parsed: ProxyConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_request_enabled_is_three_way() {
        let request: ProxyRequest =
            serde_json::from_str(r#"{"hostname": "h", "port": 80}"#).expect("deserialize");
        assert_eq!(request.enabled, None);

        let request: ProxyRequest =
            serde_json::from_str(r#"{"hostname": "h", "port": 80, "enabled": false}"#)
                .expect("deserialize");
        assert_eq!(request.enabled, Some(false));
    }
}
