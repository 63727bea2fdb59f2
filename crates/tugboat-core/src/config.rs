//! Configuration file for tugboat
//!
//! A single TOML file (`~/.tugboat` unless overridden) holding the API
//! credentials, SSH settings used by `tugboat ssh`, and default droplet
//! options for `tugboat create`. Every section may be omitted.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tugboat_api::requests::CreateDropletRequest;
use tugboat_client::{Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient};

use crate::error::{CoreError, Result};

/// File name of the config in the home directory
pub const CONFIG_FILE_NAME: &str = ".tugboat";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API credentials
    #[serde(default)]
    pub authentication: AuthConfig,
    /// API endpoint settings
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Settings for `tugboat ssh`
    #[serde(default)]
    pub ssh: SshConfig,
    /// Fallbacks for `tugboat create`
    #[serde(default)]
    pub defaults: DropletDefaults,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub client_key: String,
    #[serde(default)]
    pub api_key: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_key", &self.client_key)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Remote login user (defaults to `$USER`)
    #[serde(default = "default_ssh_user")]
    pub user: String,
    /// Private key, `~` is expanded at use
    #[serde(default = "default_ssh_key_path")]
    pub key_path: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            user: default_ssh_user(),
            key_path: default_ssh_key_path(),
            port: default_ssh_port(),
        }
    }
}

/// `$USER`, or `root` when unset
#[must_use]
pub fn default_ssh_user() -> String {
    std::env::var("USER").unwrap_or_else(|_| "root".to_string())
}

/// `~/.ssh/id_rsa`
#[must_use]
pub fn default_ssh_key_path() -> String {
    "~/.ssh/id_rsa".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropletDefaults {
    #[serde(default = "default_size_id")]
    pub size_id: u64,
    #[serde(default = "default_image_id")]
    pub image_id: u64,
    #[serde(default = "default_region_id")]
    pub region_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key_ids: Option<String>,
}

impl Default for DropletDefaults {
    fn default() -> Self {
        Self {
            size_id: default_size_id(),
            image_id: default_image_id(),
            region_id: default_region_id(),
            ssh_key_ids: None,
        }
    }
}

fn default_size_id() -> u64 {
    CreateDropletRequest::DEFAULT_SIZE_ID
}

fn default_image_id() -> u64 {
    CreateDropletRequest::DEFAULT_IMAGE_ID
}

fn default_region_id() -> u64 {
    CreateDropletRequest::DEFAULT_REGION_ID
}

impl Config {
    /// `~/.tugboat`
    ///
    /// # Errors
    /// Returns `CoreError::NoHomeDir` if the home directory is unknown
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(CoreError::NoHomeDir)
    }

    /// Load configuration from file
    ///
    /// A missing file means the user never ran `tugboat authorize`.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::NotAuthorized {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(CoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(CoreError::NotAuthorized { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Write configuration, readable only by the owner on unix
    ///
    /// # Errors
    /// Returns error if serialization or the write fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        let io_err = |source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        std::fs::write(path, content).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// API credentials, if both halves are present
    ///
    /// # Errors
    /// Returns `CoreError::NotAuthorized` when either key is blank
    pub fn credentials(&self, path: &Path) -> Result<Credentials> {
        let auth = &self.authentication;
        if auth.client_key.trim().is_empty() || auth.api_key.trim().is_empty() {
            return Err(CoreError::NotAuthorized {
                path: path.to_path_buf(),
            });
        }
        Ok(Credentials::new(
            auth.client_key.trim(),
            auth.api_key.trim(),
        ))
    }

    /// Request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout_secs)
    }

    /// Build an API client from this configuration
    ///
    /// # Errors
    /// Returns error if credentials are missing or the base URL is invalid
    pub fn client(&self, path: &Path) -> Result<HttpClient> {
        let credentials = self.credentials(path)?;
        Ok(HttpClient::with_timeout(
            &self.connection.base_url,
            credentials,
            self.timeout(),
        )?)
    }
}
