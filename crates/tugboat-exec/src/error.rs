//! Error types for tugboat-exec

use thiserror::Error;

use crate::keys::KeyError;

/// Errors that can occur while launching an SSH session
#[derive(Error, Debug)]
pub enum ExecError {
    /// Droplet has not been assigned an address yet
    #[error("droplet '{0}' has no IP address yet")]
    MissingHost(String),

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(#[from] KeyError),

    /// Process spawn error
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that could not be started
        program: String,
        /// Underlying error
        source: std::io::Error,
    },
}
