//! tugboat-core: Configuration and droplet resolution
//!
//! Loads the `~/.tugboat` config file and turns the CLI's droplet selectors
//! (id, exact name, fuzzy name) into a single droplet via the API client.

pub mod config;
pub mod error;
pub mod lookup;

pub use config::{AuthConfig, Config, ConnectionConfig, DropletDefaults, SshConfig};
pub use error::{CoreError, Result};
pub use lookup::{
    DropletChooser, DropletSelector, Resolution, find_exact, find_fuzzy, resolve_droplet,
};
