//! Platform output normalization
//!
//! `networksetup -getwebproxy` answers with line-oriented `Key: Value`
//! text and less than ideal property names. This module parses that text
//! into a canonical [`ProxyConfig`] before anyone else sees it.

use crate::common::{ProxyError, Result};
use super::state::is_enabled;
use super::types::ProxyConfig;

/// Parse the platform tool's proxy query output.
///
/// Recognized keys are `Server`, `Port`, and `Enabled` (case-sensitive,
/// as the platform prints them); unrecognized keys are ignored so extra
/// platform-reported fields do not break parsing. Missing keys fall back
/// to the unconfigured defaults.
///
/// Callers must reject empty output before normalizing; this function
/// assumes there is something to parse.
pub fn normalize(raw: &str) -> Result<ProxyConfig> {
    let mut config = ProxyConfig::default();
    let mut saw_pair = false;

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        saw_pair = true;
        let value = value.trim();

        match key.trim() {
            "Server" => config.hostname = value.to_string(),
            "Port" => {
                if !value.is_empty() {
                    config.port = value.parse().map_err(|_| {
                        ProxyError::Parse(format!("Invalid port value: {}", value))
                    })?;
                }
            }
            "Enabled" => config.enabled = is_enabled(value),
            _ => {}
        }
    }

    if !saw_pair {
        return Err(ProxyError::Parse(format!(
            "Not a key/value listing: {}",
            raw.trim()
        )));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_output() {
        let output = "Enabled: Yes\nServer: proxy.example.com\nPort: 8080";
        let config = normalize(output).expect("Failed to parse output");

        assert_eq!(
            config,
            ProxyConfig {
                hostname: "proxy.example.com".to_string(),
                port: 8080,
                enabled: true,
            }
        );
    }

    #[test]
    fn test_normalize_ignores_extra_keys() {
        let output = "Enabled: No\nServer: proxy.example.com\nPort: 8080\nAuthenticated Proxy Enabled: 0";
        let config = normalize(output).expect("Failed to parse output");

        assert_eq!(config.hostname, "proxy.example.com");
        assert_eq!(config.port, 8080);
        assert!(!config.enabled);
    }

    #[test]
    fn test_normalize_key_order_is_not_significant() {
        let output = "Port: 3128\nEnabled: Yes\nServer: 127.0.0.1";
        let config = normalize(output).expect("Failed to parse output");

        assert_eq!(config.hostname, "127.0.0.1");
        assert_eq!(config.port, 3128);
        assert!(config.enabled);
    }

    #[test]
    fn test_normalize_missing_keys_default() {
        let config = normalize("Enabled: No").expect("Failed to parse output");

        assert_eq!(config.hostname, "");
        assert_eq!(config.port, 0);
        assert!(!config.enabled);
    }

    #[test]
    fn test_normalize_empty_port_value() {
        // A cleared proxy reads back with a blank port field.
        let config = normalize("Enabled: No\nServer: \nPort: ").expect("Failed to parse output");

        assert_eq!(config.hostname, "");
        assert_eq!(config.port, 0);
    }

    #[test]
    fn test_normalize_keys_are_case_sensitive() {
        // Lowercase keys are unrecognized, so they are ignored and every
        // field keeps its default.
        let config = normalize("enabled: yes\nserver: x\nport: 1").expect("Failed to parse output");
        assert_eq!(config, ProxyConfig::default());
    }

    #[test]
    fn test_normalize_rejects_unstructured_text() {
        let err = normalize("** Error ** The parameters were not valid")
            .expect_err("parse should fail");
        assert!(matches!(err, ProxyError::Parse(_)));
    }

    #[test]
    fn test_normalize_invalid_port() {
        let err = normalize("Port: not-a-number").expect_err("parse should fail");
        assert!(matches!(err, ProxyError::Parse(_)));
    }

    #[test]
    fn test_normalize_out_of_range_port() {
        let err = normalize("Port: 70000").expect_err("parse should fail");
        assert!(matches!(err, ProxyError::Parse(_)));
    }
}
