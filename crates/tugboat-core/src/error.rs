//! Core error types for tugboat-core

use std::path::PathBuf;

use thiserror::Error;
use tugboat_client::ClientError;

/// Errors that can occur while loading configuration or resolving droplets
#[derive(Error, Debug)]
pub enum CoreError {
    /// No usable credentials
    #[error("no credentials found in {}; run `tugboat authorize` first", path.display())]
    NotAuthorized {
        /// Config file that was consulted
        path: PathBuf,
    },

    /// A droplet command was run without any way to identify the droplet
    #[error("no droplet specified; pass a fuzzy name, --name or --id (see `tugboat help`)")]
    NoSelector,

    /// Name lookup came back empty
    #[error("unable to find a droplet named '{0}'")]
    DropletNotFound(String),

    /// Interactive choice outside the candidate list
    #[error("choice {choice} is out of range (0-{})", count.saturating_sub(1))]
    SelectionOutOfRange {
        /// Index that was picked
        choice: usize,
        /// Number of candidates offered
        count: usize,
    },

    /// Prompting the user failed
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Home directory could not be determined
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Reading or writing the config file failed
    #[error("config I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::Config`]
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// API call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
