//! Platform command tables
//!
//! This module describes how each supported operating system manages its
//! proxy configuration: which tool to run, which arguments select each
//! operation, and where the configuration database lives. A table is
//! selected once at startup; unsupported platforms fail fast instead of
//! branching inside each operation.

pub mod macos;

use once_cell::sync::OnceCell;

use crate::common::{ProxyError, Result};

/// Command surface of a platform's network configuration tool.
///
/// The table is plain data, so tables for other platforms stay
/// constructible (and testable) everywhere; only [`detect`] is tied to
/// the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCommands {
    /// Binary that manages network devices / services
    pub tool: &'static str,
    /// Argument that queries the current proxy configuration
    pub get: &'static str,
    /// Argument that writes hostname and port
    pub set: &'static str,
    /// Argument that turns the proxy on or off
    pub state: &'static str,
    /// Argument that lists network services in preference order
    pub service_order: &'static str,
    /// OS-managed configuration database watched for out-of-band changes
    pub preferences_path: &'static str,
}

// The host's table, resolved once on first use
static HOST_COMMANDS: OnceCell<Option<&'static PlatformCommands>> = OnceCell::new();

/// Select the command table for the host operating system
///
/// The selection happens once per process; every later call answers from
/// the cached result.
///
/// # Returns
///
/// A reference to the platform's command table, or
/// `ProxyError::UnsupportedPlatform` when the host has none.
pub fn detect() -> Result<&'static PlatformCommands> {
    let selected = *HOST_COMMANDS.get_or_init(|| match std::env::consts::OS {
        "macos" => Some(&macos::COMMANDS),
        _ => None,
    });

    selected.ok_or(ProxyError::UnsupportedPlatform(std::env::consts::OS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_host() {
        match detect() {
            Ok(commands) => assert_eq!(*commands, macos::COMMANDS),
            Err(err) => assert!(matches!(err, ProxyError::UnsupportedPlatform(_))),
        }
    }

    #[test]
    fn test_unsupported_platform_message() {
        let err = ProxyError::UnsupportedPlatform("freebsd");
        assert_eq!(err.to_string(), "Support for freebsd is not ready yet.");
    }
}
