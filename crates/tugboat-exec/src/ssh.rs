//! Interactive SSH sessions via the system `ssh` client

use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::error::ExecError;
use crate::keys::resolve_key;
use crate::result::{ConnectionInfo, SessionResult};

/// Program launched for sessions
pub const SSH_PROGRAM: &str = "ssh";

/// Options passed on every session; host keys are neither checked nor recorded
const SSH_OPTIONS: [&str; 4] = [
    "IdentitiesOnly=yes",
    "LogLevel=ERROR",
    "StrictHostKeyChecking=no",
    "UserKnownHostsFile=/dev/null",
];

/// An `ssh` invocation against one droplet
#[derive(Debug, Clone)]
pub struct SshCommand {
    conn_info: ConnectionInfo,
    program: String,
}

impl SshCommand {
    /// Create a command for the given connection
    #[must_use]
    pub fn new(conn_info: ConnectionInfo) -> Self {
        Self {
            conn_info,
            program: SSH_PROGRAM.to_string(),
        }
    }

    /// Launch a different program with the same arguments
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Get connection info
    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.conn_info
    }

    /// Program that will be launched
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list, destination last
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(SSH_OPTIONS.len() * 2 + 5);
        for option in SSH_OPTIONS {
            args.push("-o".to_string());
            args.push(option.to_string());
        }
        if let Some(key) = &self.conn_info.ssh_key {
            args.push("-i".to_string());
            args.push(key.display().to_string());
        }
        args.push("-p".to_string());
        args.push(self.conn_info.port.to_string());
        args.push(self.conn_info.destination());
        args
    }

    /// Run the session with the terminal attached and wait for it to end
    ///
    /// # Errors
    /// Returns `ExecError::Spawn` if the program cannot be started
    #[instrument(skip(self), fields(host = %self.conn_info.host))]
    pub async fn run(&self) -> Result<SessionResult, ExecError> {
        let args = self.args();
        debug!(program = %self.program, ?args, "launching SSH session");

        let start = Instant::now();
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ExecError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = SessionResult {
            status: status.code().unwrap_or(-1),
            duration: start.elapsed(),
        };
        info!(
            host = %self.conn_info.host,
            status = result.status,
            duration = ?result.duration,
            "SSH session ended"
        );
        Ok(result)
    }
}

/// Builder for `SshCommand`
pub struct SshCommandBuilder {
    conn_info: ConnectionInfo,
    key_path: Option<String>,
    label: Option<String>,
}

impl SshCommandBuilder {
    /// Create builder with required fields
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            conn_info: ConnectionInfo::new(host, user),
            key_path: None,
            label: None,
        }
    }

    /// Name used in errors, usually the droplet name
    #[must_use]
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set SSH key path, `~` is expanded on build
    #[must_use]
    pub fn with_key_path(mut self, path: impl Into<String>) -> Self {
        self.key_path = Some(path.into());
        self
    }

    /// Set custom port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.conn_info.port = port;
        self
    }

    /// Build the command
    ///
    /// # Errors
    /// Returns `ExecError::MissingHost` for an empty host, or `ExecError::Key`
    /// if the key cannot be used
    pub fn build(self) -> Result<SshCommand, ExecError> {
        if self.conn_info.host.trim().is_empty() {
            return Err(ExecError::MissingHost(
                self.label.unwrap_or(self.conn_info.user),
            ));
        }

        let mut conn_info = self.conn_info;
        if let Some(raw) = self.key_path {
            conn_info = conn_info.with_ssh_key(resolve_key(&raw)?);
        }
        Ok(SshCommand::new(conn_info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_layout() {
        let conn = ConnectionInfo::new("203.0.113.7", "deploy")
            .with_port(2222)
            .with_ssh_key("/keys/id_rsa");
        let args = SshCommand::new(conn).args();

        assert_eq!(
            args,
            vec![
                "-o",
                "IdentitiesOnly=yes",
                "-o",
                "LogLevel=ERROR",
                "-o",
                "StrictHostKeyChecking=no",
                "-o",
                "UserKnownHostsFile=/dev/null",
                "-i",
                "/keys/id_rsa",
                "-p",
                "2222",
                "deploy@203.0.113.7",
            ]
        );
    }

    #[test]
    fn test_args_without_key() {
        let args = SshCommand::new(ConnectionInfo::new("host", "root")).args();

        assert!(!args.contains(&"-i".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("root@host"));
    }

    #[test]
    fn test_builder_rejects_missing_host() {
        let result = SshCommandBuilder::new("", "root").named("web-01").build();
        assert!(matches!(result, Err(ExecError::MissingHost(ref name)) if name == "web-01"));
    }

    #[test]
    fn test_builder_validates_key() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = SshCommandBuilder::new("10.0.0.1", "root")
            .with_key_path(missing.to_str().unwrap())
            .build();
        assert!(matches!(result, Err(ExecError::Key(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_status() {
        let ok = SshCommand::new(ConnectionInfo::new("host", "root"))
            .with_program("true")
            .run()
            .await
            .unwrap();
        assert!(ok.success());

        let failed = SshCommand::new(ConnectionInfo::new("host", "root"))
            .with_program("false")
            .run()
            .await
            .unwrap();
        assert!(!failed.success());
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let result = SshCommand::new(ConnectionInfo::new("host", "root"))
            .with_program("tugboat-no-such-ssh-binary")
            .run()
            .await;
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }
}
