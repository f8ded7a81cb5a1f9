//! OS Proxy: a uniform API over the operating system's proxy configuration
//!
//! This library reads and mutates the host's network proxy settings
//! through the platform's own configuration tool, and watches the
//! OS-managed configuration database for changes made by other programs.
//!
//! # Main Features
//!
//! - Read the current proxy configuration as a canonical record
//! - Set, enable, disable, toggle, and clear the configured proxy
//! - Compensate for the platform turning a proxy on whenever one is set
//! - Subscribe to change events when any program rewrites the settings
//!
//! # Example
//!
//! ```no_run
//! use os_proxy::config::Settings;
//! use os_proxy::{ProxyController, ProxyRequest, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::default();
//!     let controller = ProxyController::from_settings(&settings)?;
//!
//!     controller
//!         .set(ProxyRequest {
//!             hostname: Some("localhost".to_string()),
//!             port: Some(8000),
//!             ..ProxyRequest::default()
//!         })
//!         .await?;
//!
//!     let proxy = controller.get(None).await?;
//!     assert_eq!(proxy.hostname, "localhost");
//!     assert!(proxy.enabled);
//!
//!     Ok(())
//! }
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod exec;
pub mod platform;
pub mod proxy;
pub mod watch;

// Re-export commonly used structures and functions for convenience
pub use common::{Operation, ProxyError, Result};
pub use exec::{CommandInvoker, SystemInvoker};
pub use proxy::{ProxyConfig, ProxyController, ProxyRequest};
pub use watch::{ChangeEvent, WatchSession};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
