//! tugboat-exec: SSH hand-off
//!
//! Resolves the configured private key and launches the system `ssh` client
//! against a droplet, inheriting the terminal.

pub mod error;
pub mod keys;
pub mod result;
pub mod ssh;

pub use error::ExecError;
pub use keys::{KeyError, expand_key_path, resolve_key};
pub use result::{ConnectionInfo, SessionResult};
pub use ssh::{SSH_PROGRAM, SshCommand, SshCommandBuilder};
