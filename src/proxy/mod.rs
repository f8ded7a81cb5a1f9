//! Proxy configuration module
//!
//! This module implements the core functionality of the controller:
//! classifying the platform's on/off spellings, normalizing tool output,
//! resolving the target network device, and the operations that read and
//! mutate the operating system's proxy store.

pub mod controller;
pub mod device;
pub mod output;
pub mod state;
pub mod types;

// Re-export commonly used structures and functions for convenience
pub use controller::ProxyController;
pub use device::DeviceResolver;
pub use output::normalize;
pub use state::is_enabled;
pub use types::{ProxyConfig, ProxyRequest};
