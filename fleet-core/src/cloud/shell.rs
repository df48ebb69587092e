//! src/cloud/shell.rs
//! ============================================================================
//! # Shell handoff
//!
//! The controller only records which instance to connect to. The binary runs
//! the session after the terminal has been restored, with inherited stdio so
//! the session owns the TTY.

use crate::error::AppError;
use tokio::process::Command;
use tracing::info;

/// Builds session commands for a fixed program and account context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellHandoff {
    program: String,
    region: String,
    profile: String,
}

impl Default for ShellHandoff {
    fn default() -> Self {
        Self::new("aws", "", "")
    }
}

impl ShellHandoff {
    pub fn new(
        program: impl Into<String>,
        region: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            region: region.into(),
            profile: profile.into(),
        }
    }

    #[must_use]
    pub fn prepare(&self, instance_id: &str) -> PendingSession {
        let mut args = vec![
            "ssm".to_string(),
            "start-session".to_string(),
            "--target".to_string(),
            instance_id.to_string(),
        ];
        if !self.region.is_empty() {
            args.push("--region".to_string());
            args.push(self.region.clone());
        }
        if !self.profile.is_empty() {
            args.push("--profile".to_string());
            args.push(self.profile.clone());
        }
        PendingSession {
            instance_id: instance_id.to_string(),
            program: self.program.clone(),
            args,
        }
    }
}

/// A session command waiting for the UI to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSession {
    pub instance_id: String,
    pub program: String,
    pub args: Vec<String>,
}

impl PendingSession {
    /// Runs the session to completion; a non-zero exit is an error.
    pub async fn run(&self) -> Result<(), AppError> {
        info!(
            marker = "SHELL_SESSION",
            operation_type = "shell",
            instance_id = %self.instance_id,
            "Starting session"
        );
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .await?;
        if status.success() {
            Ok(())
        } else {
            Err(AppError::ExternalCmd {
                cmd: format!("{} {}", self.program, self.args.join(" ")),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_honours_region_and_profile() {
        let session = ShellHandoff::new("aws", "us-east-2", "ops").prepare("i-42");
        assert_eq!(session.instance_id, "i-42");
        assert_eq!(
            session.args,
            [
                "ssm",
                "start-session",
                "--target",
                "i-42",
                "--region",
                "us-east-2",
                "--profile",
                "ops"
            ]
        );
    }

    #[test]
    fn test_prepare_without_context() {
        let session = ShellHandoff::default().prepare("i-1");
        assert_eq!(session.program, "aws");
        assert_eq!(session.args.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let session = ShellHandoff::new("/nonexistent/fleet-shell", "", "").prepare("i-1");
        assert!(session.run().await.is_err());
    }
}
