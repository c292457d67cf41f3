use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use warden_model::{COMPOSE_FILE_NAME, InstanceName};

use crate::error::ExecError;

/// Deployment action dispatched to the external compose tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction {
    /// Bring the instance's stack up, detached.
    Start,
    /// Tear the stack down, removing volumes and orphans.
    Stop,
}

impl LaunchAction {
    /// Label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchAction::Start => "start",
            LaunchAction::Stop => "stop",
        }
    }

    /// Subcommand arguments appended after `-f <compose file>`.
    fn compose_args(&self) -> &'static [&'static str] {
        match self {
            LaunchAction::Start => &["up", "-d"],
            LaunchAction::Stop => &["down", "-v", "--remove-orphans"],
        }
    }
}

/// Fire-and-forget bridge to the external deployment tool.
///
/// The launcher resolves an instance name into its compose descriptor under
/// the catalog root and spawns `docker-compose` against it. Per the
/// controller's contract the spawn is not awaited: completion is the
/// deployment runtime's business, a background task only logs the eventual
/// exit status.
pub struct ComposeLauncher {
    root: PathBuf,
}

impl ComposeLauncher {
    /// Create a launcher over the catalog root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the compose descriptor for `name`.
    pub fn compose_file(&self, name: &InstanceName) -> PathBuf {
        self.root.join(name.as_str()).join(COMPOSE_FILE_NAME)
    }

    /// Spawn the deployment tool for `name` and return immediately.
    ///
    /// Only the spawn itself can fail here (tool missing, fork refused);
    /// a non-zero exit of the tool is logged by the reaper task, not
    /// surfaced to the caller.
    pub fn dispatch(&self, name: &InstanceName, action: LaunchAction) -> Result<(), ExecError> {
        let compose = self.compose_file(name);

        let mut child = compose_command(&compose, action)
            .spawn()
            .map_err(|e| ExecError::Spawn {
                instance: name.to_string(),
                source: e,
            })?;

        info!(
            instance = %name,
            action = action.as_label(),
            compose = %compose.display(),
            "deployment dispatched"
        );

        let instance = name.to_string();
        let label = action.as_label();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    debug!(instance = %instance, action = label, "deployment tool exited cleanly")
                }
                Ok(status) => {
                    warn!(instance = %instance, action = label, %status, "deployment tool failed")
                }
                Err(e) => {
                    warn!(instance = %instance, action = label, error = %e, "cannot reap deployment tool")
                }
            }
        });

        Ok(())
    }
}

fn compose_command(compose: &Path, action: LaunchAction) -> Command {
    let mut cmd = Command::new("docker-compose");
    cmd.arg("-f")
        .arg(compose)
        .args(action.compose_args())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

#[cfg(test)]
mod tests {
    use super::{ComposeLauncher, LaunchAction, compose_command};
    use warden_model::InstanceName;

    #[test]
    fn compose_file_is_resolved_under_the_root() {
        let launcher = ComposeLauncher::new("/srv/servers");
        let name = InstanceName::new("alice").unwrap();

        assert_eq!(
            launcher.compose_file(&name),
            std::path::PathBuf::from("/srv/servers/alice/docker-compose.yml")
        );
    }

    #[test]
    fn start_and_stop_use_expected_subcommands() {
        assert_eq!(LaunchAction::Start.compose_args(), ["up", "-d"]);
        assert_eq!(
            LaunchAction::Stop.compose_args(),
            ["down", "-v", "--remove-orphans"]
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(LaunchAction::Start.as_label(), "start");
        assert_eq!(LaunchAction::Stop.as_label(), "stop");
    }

    #[test]
    fn command_targets_the_compose_file() {
        let cmd = compose_command(
            std::path::Path::new("/srv/servers/alice/docker-compose.yml"),
            LaunchAction::Start,
        );
        let args: Vec<&str> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_str().unwrap())
            .collect();

        assert_eq!(cmd.as_std().get_program(), "docker-compose");
        assert_eq!(
            args,
            ["-f", "/srv/servers/alice/docker-compose.yml", "up", "-d"]
        );
    }
}
