//! Error types for next-hop and route operations.
//!
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use thiserror::Error;

/// Result type alias for nhmgr operations.
pub type NhMgrResult<T> = Result<T, NhMgrError>;

/// Errors that can occur while driving the `ip` utility.
#[derive(Debug, Error)]
pub enum NhMgrError {
    /// The command could not be launched (spawn error).
    #[error("Failed to execute command '{command}': {source}")]
    ShellExec {
        /// The joined command line.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The command ran and returned a non-zero exit code.
    #[error("Command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The joined command line.
        command: String,
        /// The exit code, or -1 if the child was killed by a signal.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// An empty argument vector was handed to the executor.
    #[error("Refusing to run an empty command")]
    EmptyCommand,

    /// A required program is not on the search path.
    #[error("Required executable '{name}' not found in PATH")]
    CommandNotFound {
        /// The program name that was looked up.
        name: String,
    },

    /// The allocator has handed out every representable ID.
    #[error("Next-hop ID space exhausted (last issued {last})")]
    IdSpaceExhausted {
        /// The last ID that was issued.
        last: u32,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl NhMgrError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a command-not-found error.
    pub fn command_not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Returns the captured command output, if the error carries any.
    pub fn output(&self) -> Option<&str> {
        match self {
            NhMgrError::ShellCommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
