//! External command execution
//!
//! This module provides the primitive that runs the platform's network
//! configuration tool and captures its standard output. The trait seam
//! exists so the controller can be exercised against scripted command
//! results without touching the host configuration.

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::common::{ProxyError, Result};

/// Runs a named executable with an argument list and captures its output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    /// Run `program` with `args` and return its captured standard output.
    ///
    /// # Returns
    ///
    /// The captured standard output on a zero exit status, otherwise
    /// `ProxyError::CommandFailed` carrying the exit status.
    async fn invoke(&self, program: &str, args: &[String]) -> Result<String>;
}

/// Command invoker backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl SystemInvoker {
    /// Create a new system invoker
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandInvoker for SystemInvoker {
    async fn invoke(&self, program: &str, args: &[String]) -> Result<String> {
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().await?;

        if !output.status.success() {
            return Err(ProxyError::CommandFailed {
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
