//! Network device resolution
//!
//! Proxy configuration is scoped to a named network service. The caller
//! may name one explicitly; otherwise the resolver either answers with
//! the configured default or asks the platform for its preferred service.

use log::debug;

use crate::common::{ProxyError, Result};
use crate::config::{DeviceStrategy, Settings};
use crate::exec::CommandInvoker;
use crate::platform::PlatformCommands;

/// Marker the platform prints in front of each service's hardware port.
const HARDWARE_PORT_LABEL: &str = "Hardware Port: ";

/// Resolves the network device used as the configuration context.
#[derive(Debug, Clone)]
pub struct DeviceResolver {
    strategy: DeviceStrategy,
    default_device: String,
}

impl DeviceResolver {
    /// Create a resolver with the given strategy and static default
    pub fn new(strategy: DeviceStrategy, default_device: impl Into<String>) -> Self {
        Self {
            strategy,
            default_device: default_device.into(),
        }
    }

    /// Create a resolver from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.device_strategy, settings.default_device.clone())
    }

    /// Resolve the device name to configure.
    ///
    /// A non-empty explicit device always wins. Otherwise the static
    /// strategy returns the configured default, and the discover strategy
    /// queries the platform's service order and extracts the first
    /// hardware port name it lists.
    pub async fn resolve<I: CommandInvoker>(
        &self,
        explicit: Option<&str>,
        invoker: &I,
        commands: &PlatformCommands,
    ) -> Result<String> {
        if let Some(device) = explicit {
            if !device.is_empty() {
                return Ok(device.to_string());
            }
        }

        match self.strategy {
            DeviceStrategy::Static => Ok(self.default_device.clone()),
            DeviceStrategy::Discover => self.discover(invoker, commands).await,
        }
    }

    /// Ask the platform for its preferred network service.
    async fn discover<I: CommandInvoker>(
        &self,
        invoker: &I,
        commands: &PlatformCommands,
    ) -> Result<String> {
        let output = invoker
            .invoke(commands.tool, &[commands.service_order.to_string()])
            .await
            .map_err(|err| ProxyError::DeviceResolution(err.to_string()))?;

        let device = parse_service_order(&output).ok_or_else(|| {
            ProxyError::DeviceResolution("No network service found.".to_string())
        })?;

        debug!("Discovered preferred network service: {}", device);
        Ok(device)
    }
}

/// Extract the first hardware port name from a service order listing.
///
/// The listing names services in preference order, each followed by a
/// line of the form `(Hardware Port: Wi-Fi, Device: en0)`.
fn parse_service_order(output: &str) -> Option<String> {
    for line in output.lines() {
        let Some(index) = line.find(HARDWARE_PORT_LABEL) else {
            continue;
        };
        let rest = &line[index + HARDWARE_PORT_LABEL.len()..];
        let name = rest
            .split_once(',')
            .map(|(name, _)| name)
            .unwrap_or(rest)
            .trim_end_matches(')')
            .trim();

        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    None
}
