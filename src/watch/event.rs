//! Change events
//!
//! Events published when the OS configuration database moves underneath
//! us. An event is a signal, not a data source: interested parties must
//! re-read the configuration to see what actually changed.

use std::path::PathBuf;

/// A detected change to a watched configuration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The path that changed
    pub path: PathBuf,
}

impl ChangeEvent {
    /// Create a change event for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
