//! Proxy configuration controller
//!
//! This module implements the read and mutation operations against the
//! operating system's proxy store. Every operation resolves a device,
//! runs the platform tool through the command invoker, and classifies
//! the result; none of them keeps mutable state in the process, so
//! unrelated callers may run operations concurrently.

use log::{debug, info};

use crate::common::{Operation, ProxyError, Result};
use crate::config::Settings;
use crate::exec::{CommandInvoker, SystemInvoker};
use crate::platform::{self, PlatformCommands};

use super::device::DeviceResolver;
use super::output::normalize;
use super::types::{ProxyConfig, ProxyRequest};

/// Controller for the operating system's proxy configuration.
///
/// The mutation operations mirror the platform tool one call at a time,
/// with one exception: writing a configuration always turns the proxy on
/// as a platform side effect, so a write that asked for a disabled proxy
/// is followed by a separate disable call. The two calls are not
/// transactional; when the follow-up fails, the proxy stays enabled and
/// the failure is reported as a disable failure.
pub struct ProxyController<I = SystemInvoker> {
    invoker: I,
    commands: &'static PlatformCommands,
    resolver: DeviceResolver,
}

impl ProxyController<SystemInvoker> {
    /// Create a controller for the host platform from resolved settings
    ///
    /// # Returns
    ///
    /// Returns a controller backed by real child processes, or
    /// `ProxyError::UnsupportedPlatform` when the host has no command
    /// table.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let commands = platform::detect()?;
        Ok(Self::with_invoker(
            SystemInvoker::new(),
            commands,
            DeviceResolver::from_settings(settings),
        ))
    }
}

impl<I: CommandInvoker> ProxyController<I> {
    /// Create a controller with an explicit invoker and command table
    pub fn with_invoker(
        invoker: I,
        commands: &'static PlatformCommands,
        resolver: DeviceResolver,
    ) -> Self {
        Self {
            invoker,
            commands,
            resolver,
        }
    }

    /// Retrieve the currently configured proxy.
    ///
    /// # Parameters
    ///
    /// * `device` - Network device to query; resolved via the device
    ///   strategy when absent
    pub async fn get(&self, device: Option<&str>) -> Result<ProxyConfig> {
        let device = self.resolve_device(device).await?;
        debug!("Querying proxy configuration for {}", device);

        let output = self
            .invoke([self.commands.get.to_string(), device])
            .await
            .map_err(|err| err.in_operation(Operation::Get))?;

        // A zero exit with nothing to parse takes its own error path,
        // distinct from a nonzero exit.
        if output.trim().is_empty() {
            return Err(ProxyError::EmptyOutput.in_operation(Operation::Get));
        }

        normalize(&output)
    }

    /// Set and optionally turn off a new proxy configuration.
    ///
    /// The platform turns the proxy on whenever a configuration is
    /// written. A request with `enabled: Some(false)` therefore issues a
    /// follow-up disable after the write succeeds; `None` and
    /// `Some(true)` leave the side effect in place.
    pub async fn set(&self, request: ProxyRequest) -> Result<()> {
        let hostname = request.hostname.ok_or_else(|| {
            ProxyError::Validation("hostname must be provided.".to_string())
        })?;
        let port = request.port.ok_or_else(|| {
            ProxyError::Validation("port must be provided.".to_string())
        })?;

        self.apply(
            request.device.as_deref(),
            &hostname,
            &port.to_string(),
            request.enabled,
            Operation::Set,
        )
        .await
    }

    /// Turn on the currently configured proxy.
    pub async fn enable(&self) -> Result<()> {
        self.set_state(true).await
    }

    /// Turn off the currently configured proxy, but keep it in the
    /// operating system's data store.
    pub async fn disable(&self) -> Result<()> {
        self.set_state(false).await
    }

    /// Toggle the currently configured proxy between on and off.
    ///
    /// The read and the following state change are two separate calls
    /// against the external store; an out-of-band change between them
    /// wins the race.
    pub async fn toggle(&self) -> Result<()> {
        let current = self.get(None).await?;

        if current.enabled {
            self.disable().await
        } else {
            self.enable().await
        }
    }

    /// Turn off and wipe the currently configured proxy from the
    /// operating system's data store.
    pub async fn clear(&self) -> Result<()> {
        self.apply(None, "", "", Some(false), Operation::Clear).await
    }

    /// Write a configuration and reconcile the enabled state.
    async fn apply(
        &self,
        device: Option<&str>,
        hostname: &str,
        port: &str,
        enabled: Option<bool>,
        operation: Operation,
    ) -> Result<()> {
        let device = self.resolve_device(device).await?;
        info!(
            "Writing proxy configuration for {}: {:?}:{:?}",
            device, hostname, port
        );

        self.invoke([
            self.commands.set.to_string(),
            device,
            hostname.to_string(),
            port.to_string(),
        ])
        .await
        .map_err(|err| err.in_operation(operation))?;

        // The write left the proxy on. Only an explicit `false` asks us
        // to put it back off; the follow-up is a plain disable and its
        // failure is reported as such.
        if enabled == Some(false) {
            self.disable().await?;
        }

        Ok(())
    }

    /// Run the state command with `on` or `off`.
    async fn set_state(&self, on: bool) -> Result<()> {
        let operation = if on { Operation::Enable } else { Operation::Disable };
        let device = self.resolve_device(None).await?;
        let state = if on { "on" } else { "off" };
        info!("Turning proxy {} for {}", state, device);

        self.invoke([
            self.commands.state.to_string(),
            device,
            state.to_string(),
        ])
        .await
        .map_err(|err| err.in_operation(operation))?;

        Ok(())
    }

    /// Resolve the device to configure.
    async fn resolve_device(&self, explicit: Option<&str>) -> Result<String> {
        self.resolver
            .resolve(explicit, &self.invoker, self.commands)
            .await
    }

    /// Run the platform tool with the given arguments.
    async fn invoke<A: Into<Vec<String>>>(&self, args: A) -> Result<String> {
        self.invoker.invoke(self.commands.tool, &args.into()).await
    }
}
