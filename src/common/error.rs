//! Error handling module
//!
//! This module defines the error types and result type aliases used in the application.

use thiserror::Error;
use std::fmt;
use std::io;

/// Controller operation named in wrapped error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read the current proxy configuration
    Get,
    /// Write a new proxy configuration
    Set,
    /// Turn the configured proxy on
    Enable,
    /// Turn the configured proxy off
    Disable,
    /// Flip the proxy between on and off
    Toggle,
    /// Wipe the stored proxy configuration
    Clear,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Set => write!(f, "set"),
            Self::Enable => write!(f, "enable"),
            Self::Disable => write!(f, "disable"),
            Self::Toggle => write!(f, "toggle"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

/// OS proxy error type
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Caller-supplied input was rejected before any external command ran
    #[error("{0}")]
    Validation(String),

    /// The network device to configure could not be determined
    #[error("Unable to determine network device. {0}")]
    DeviceResolution(String),

    /// The external command exited zero but produced nothing to parse
    #[error("No output to parse.")]
    EmptyOutput,

    /// The external command exited nonzero (`code` is `None` when the
    /// process was killed by a signal)
    #[error("{}", format_exit(.code))]
    CommandFailed {
        /// Process exit status
        code: Option<i32>,
    },

    /// Command output did not match the expected structured shape
    #[error("Unexpected output: {0}")]
    Parse(String),

    /// The current operating system has no command table
    #[error("Support for {0} is not ready yet.")]
    UnsupportedPlatform(&'static str),

    /// A controller operation failed; wraps the underlying reason
    #[error("Unable to {operation} proxy configuration. {source}")]
    OperationFailed {
        /// The operation that was attempted
        operation: Operation,
        /// The underlying failure
        source: Box<ProxyError>,
    },

    /// Filesystem watcher error
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn format_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Exit code {}.", code),
        None => "Terminated by signal.".to_string(),
    }
}

impl ProxyError {
    /// Wrap this error with the operation that was being attempted.
    ///
    /// Validation and device resolution failures are surfaced as-is, and an
    /// error that already names an operation keeps its original attribution.
    pub fn in_operation(self, operation: Operation) -> Self {
        match self {
            err @ (Self::Validation(_)
            | Self::DeviceResolution(_)
            | Self::OperationFailed { .. }) => err,
            err => Self::OperationFailed {
                operation,
                source: Box::new(err),
            },
        }
    }
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `ProxyError`.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_display() {
        let err = ProxyError::CommandFailed { code: Some(14) };
        assert_eq!(err.to_string(), "Exit code 14.");

        let err = ProxyError::CommandFailed { code: None };
        assert_eq!(err.to_string(), "Terminated by signal.");
    }

    #[test]
    fn test_operation_wrapping() {
        let err = ProxyError::EmptyOutput.in_operation(Operation::Get);
        assert_eq!(
            err.to_string(),
            "Unable to get proxy configuration. No output to parse."
        );

        let err = ProxyError::CommandFailed { code: Some(1) }.in_operation(Operation::Set);
        assert_eq!(
            err.to_string(),
            "Unable to set proxy configuration. Exit code 1."
        );
    }

    #[test]
    fn test_validation_is_not_wrapped() {
        let err = ProxyError::Validation("hostname must be provided.".to_string())
            .in_operation(Operation::Set);
        assert!(matches!(err, ProxyError::Validation(_)));
    }

    #[test]
    fn test_wrapped_error_keeps_first_operation() {
        let err = ProxyError::EmptyOutput
            .in_operation(Operation::Get)
            .in_operation(Operation::Toggle);
        assert_eq!(
            err.to_string(),
            "Unable to get proxy configuration. No output to parse."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "command not found");
        let err: ProxyError = io_err.into();
        assert!(matches!(err, ProxyError::Io(_)));
    }
}
