use crate::core::environment::Environment;
use crate::domain::model::{ServiceRecord, SupervisorEvent};
use crate::domain::ports::{EventSink, Launcher};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Runs each start command through `<shell> -c <command>`.
///
/// Blocking services run their commands one after another, each raced against
/// the effective timeout. Non-blocking services only ever spawn their first
/// command and return immediately.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: PathBuf,
    environment: Environment,
}

impl ShellLauncher {
    pub fn new(environment: Environment) -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            environment,
        }
    }

    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    fn spawn(&self, command: &str) -> io::Result<Child> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .envs(self.environment.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            // own process group, so a timeout kill also reaches the shell's children
            .process_group(0)
            .kill_on_drop(false);
        cmd.spawn()
    }

    /// Runs one blocking step to completion or until `timeout` fires.
    async fn run_blocking(
        &self,
        record: &ServiceRecord,
        command: &str,
        timeout: Duration,
    ) -> SupervisorEvent {
        let mut child = match self.spawn(command) {
            Ok(child) => child,
            Err(e) => return SupervisorEvent::failed(record, command, e.to_string()),
        };

        tokio::select! {
            status = child.wait() => match status {
                Ok(status) if status.success() => SupervisorEvent::started(record, command),
                Ok(status) => SupervisorEvent::failed(record, command, status.to_string()),
                Err(e) => SupervisorEvent::failed(record, command, e.to_string()),
            },
            _ = tokio::time::sleep(timeout) => {
                kill_process_group(&mut child);
                // reap the killed child so its waiter does not linger
                if let Err(e) = child.wait().await {
                    tracing::debug!(service = %record.name, "wait after kill failed: {}", e);
                }
                SupervisorEvent::failed(
                    record,
                    command,
                    format!("timeout after {} secs", timeout.as_secs()),
                )
            }
        }
    }

    fn spawn_detached(&self, record: &ServiceRecord, command: &str) -> SupervisorEvent {
        match self.spawn(command) {
            Ok(mut child) => {
                let name = record.name.clone();
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) => tracing::debug!(service = %name, "exited with {}", status),
                        Err(e) => tracing::debug!(service = %name, "wait failed: {}", e),
                    }
                });
                SupervisorEvent::started(record, command)
            }
            Err(e) => SupervisorEvent::failed(record, command, e.to_string()),
        }
    }
}

#[async_trait]
impl Launcher for ShellLauncher {
    async fn start(&self, record: &ServiceRecord, timeout: Duration, sink: &dyn EventSink) {
        for command in &record.start_commands {
            tracing::debug!(service = %record.name, blocking = record.blocking, "running: {}", command);

            if !record.blocking {
                // Single shot: the remaining start commands are never run.
                sink.emit(self.spawn_detached(record, command));
                return;
            }

            // A failed step does not abort the following ones.
            sink.emit(self.run_blocking(record, command, timeout).await);
        }
    }
}

fn kill_process_group(child: &mut Child) {
    if let Some(pid) = child.id() {
        // SAFETY: kill(2) with a negative pid signals the process group led by
        // the child; an invalid group only yields an error return.
        let result = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
        if result == 0 {
            return;
        }
        tracing::debug!(
            "killpg({}) failed: {}; killing the shell only",
            pid,
            io::Error::last_os_error()
        );
    }

    if let Err(e) = child.start_kill() {
        tracing::warn!("failed to kill child process: {}", e);
    }
}
