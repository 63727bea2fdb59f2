//! SSH key path resolution

use std::path::{Path, PathBuf};

use tracing::debug;

/// Key resolution errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("could not determine home directory to expand {0}")]
    NoHomeDir(String),

    #[error("key file permissions too open: {0} (should be 600)")]
    BadPermissions(String),

    #[error("key file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Expand a leading `~` to the home directory
///
/// # Errors
/// Returns `KeyError::NoHomeDir` if the path starts with `~` and no home is known
pub fn expand_key_path(raw: &str) -> Result<PathBuf, KeyError> {
    let home = || dirs::home_dir().ok_or_else(|| KeyError::NoHomeDir(raw.to_string()));

    if raw == "~" {
        return home();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return Ok(home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Expand and validate a configured key path
///
/// # Errors
/// Returns `KeyError` if the key is missing or readable by others
pub fn resolve_key(raw: &str) -> Result<PathBuf, KeyError> {
    let path = expand_key_path(raw)?;
    validate_key_permissions(&path)?;
    debug!(path = %path.display(), "resolved SSH key");
    Ok(path)
}

#[cfg(unix)]
fn validate_key_permissions(path: &Path) -> Result<(), KeyError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(KeyError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(KeyError::Io(e)),
    };

    // group and other bits must be clear
    if metadata.permissions().mode() & 0o77 != 0 {
        return Err(KeyError::BadPermissions(path.display().to_string()));
    }

    Ok(())
}

#[cfg(not(unix))]
fn validate_key_permissions(path: &Path) -> Result<(), KeyError> {
    if path.exists() {
        Ok(())
    } else {
        Err(KeyError::NotFound(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(expand_key_path("~").unwrap(), home);
        assert_eq!(
            expand_key_path("~/.ssh/id_rsa").unwrap(),
            home.join(".ssh/id_rsa")
        );
    }

    #[test]
    fn test_expand_leaves_other_paths() {
        assert_eq!(
            expand_key_path("/keys/deploy").unwrap(),
            PathBuf::from("/keys/deploy")
        );
        assert_eq!(
            expand_key_path("~other/key").unwrap(),
            PathBuf::from("~other/key")
        );
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_missing");

        assert!(matches!(
            resolve_key(path.to_str().unwrap()),
            Err(KeyError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_test");
        std::fs::write(&path, "key").unwrap();

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(
            resolve_key(path.to_str().unwrap()),
            Err(KeyError::BadPermissions(_))
        ));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();
        assert_eq!(resolve_key(path.to_str().unwrap()).unwrap(), path);
    }
}
