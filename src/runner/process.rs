//! Process backends and the stderr streaming path.

use super::{Invocation, Outcome, RunSink};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;

/// Result of executing one invocation on a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub outcome: Outcome,
    /// Bytes of stdout drained and discarded.
    pub stdout_bytes: u64,
}

impl Execution {
    /// Execution that exited with `code` and produced no stdout.
    pub fn exited(code: i32) -> Self {
        Self {
            outcome: Outcome::Exited(code),
            stdout_bytes: 0,
        }
    }

    /// Execution that never started.
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::SpawnFailed(reason.into()),
            stdout_bytes: 0,
        }
    }
}

/// Seam between the runner and the OS process layer.
///
/// Implementations must only return once the process has exited and every
/// stderr line has been passed to `stderr`.
#[async_trait]
pub trait ProcessBackend: Send + Sync {
    async fn execute(&self, invocation: &Invocation, stderr: &StderrForwarder<'_>) -> Execution;
}

/// Delivers stderr lines of one run to its sink as they arrive.
pub struct StderrForwarder<'a> {
    sink: &'a dyn RunSink,
    command: &'a str,
}

impl<'a> StderrForwarder<'a> {
    pub fn new(sink: &'a dyn RunSink, command: &'a str) -> Self {
        Self { sink, command }
    }

    /// Forward one line; trailing CR/LF is stripped and blank lines are dropped.
    pub fn forward_line(&self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return;
        }
        tracing::debug!(command = self.command, line, "stderr");
        self.sink.stderr_line(self.command, line);
    }

    /// Forward a chunk that may hold several lines.
    pub fn forward_text(&self, text: &str) {
        for line in text.split('\n') {
            self.forward_line(line);
        }
    }
}

/// Runs invocations through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

#[async_trait]
impl ProcessBackend for ShellBackend {
    async fn execute(&self, invocation: &Invocation, stderr: &StderrForwarder<'_>) -> Execution {
        if let Some(dir) = invocation.working_dir() {
            if !dir.is_dir() {
                return Execution::spawn_failed(format!(
                    "working directory `{}` does not exist",
                    dir.display()
                ));
            }
        }

        let mut cmd = shell_command(invocation);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return Execution::spawn_failed(format!("{}: {e}", shell_program())),
        };

        let stdout = child.stdout.take();
        let child_stderr = child.stderr.take();
        let (stdout_bytes, (), status) = tokio::join!(
            drain(stdout),
            pump_lines(child_stderr, stderr),
            child.wait()
        );

        let outcome = match status {
            Ok(status) => status.code().map_or(Outcome::Terminated, Outcome::Exited),
            Err(e) => Outcome::WaitFailed(e.to_string()),
        };
        Execution {
            outcome,
            stdout_bytes,
        }
    }
}

#[cfg(windows)]
fn shell_program() -> &'static str {
    "cmd"
}

#[cfg(not(windows))]
fn shell_program() -> &'static str {
    "sh"
}

fn shell_command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(shell_program());
    if cfg!(windows) {
        cmd.arg("/C");
    } else {
        cmd.arg("-c");
    }
    cmd.arg(invocation.command());

    let options = invocation.options();
    if !options.inherit_env {
        cmd.env_clear();
    }
    cmd.envs(&options.env);
    if let Some(dir) = &options.working_dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// Read a pipe to EOF and count, but discard, its bytes.
async fn drain<R>(pipe: Option<R>) -> u64
where
    R: AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return 0;
    };
    let mut buf = [0u8; 8192];
    let mut total = 0u64;
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => total += n as u64,
            Err(e) => {
                tracing::warn!(error = %e, "failed reading child stdout");
                break;
            }
        }
    }
    total
}

/// Forward every line of a pipe until EOF.
async fn pump_lines<R>(pipe: Option<R>, forwarder: &StderrForwarder<'_>)
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return;
    };
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => forwarder.forward_line(&String::from_utf8_lossy(&buf)),
            Err(e) => {
                tracing::warn!(command = forwarder.command, error = %e, "failed reading child stderr");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Completion, RunOptions, SilentSink};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl RunSink for Lines {
        fn stderr_line(&self, _command: &str, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }

        fn finished(&self, _completion: &Completion) {}
    }

    #[test]
    fn forwarder_strips_line_endings_and_skips_blanks() {
        let sink = Lines::default();
        let forwarder = StderrForwarder::new(&sink, "bower install");
        forwarder.forward_text("bower cached\r\n\r\n\nbower resolved\n");
        forwarder.forward_line("\r\n");
        assert_eq!(
            *sink.0.lock().unwrap(),
            vec!["bower cached", "bower resolved"]
        );
    }

    #[tokio::test]
    async fn missing_working_directory_is_a_spawn_failure() {
        let invocation = Invocation::new(
            "composer install",
            RunOptions::default()
                .with_working_dir("/definitely/not/here/elebee-src"),
        )
        .unwrap();
        let sink = SilentSink;
        let forwarder = StderrForwarder::new(&sink, invocation.command());
        let execution = ShellBackend.execute(&invocation, &forwarder).await;
        match execution.outcome {
            Outcome::SpawnFailed(reason) => assert!(reason.contains("does not exist"), "{reason}"),
            other => panic!("expected spawn failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_backend_streams_stderr_and_suppresses_stdout() {
        let invocation = Invocation::new(
            "echo visible >&2; echo hidden; printf 'tail' >&2; exit 4",
            RunOptions::default(),
        )
        .unwrap();
        let sink = Lines::default();
        let forwarder = StderrForwarder::new(&sink, invocation.command());
        let execution = ShellBackend.execute(&invocation, &forwarder).await;
        assert_eq!(execution.outcome, Outcome::Exited(4));
        assert_eq!(execution.stdout_bytes, "hidden\n".len() as u64);
        assert_eq!(*sink.0.lock().unwrap(), vec!["visible", "tail"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_backend_applies_env_and_cwd() {
        let dir = crate::testsupport::TestTempDir::new("process-env");
        let invocation = Invocation::new(
            "echo \"$ELEBEE_STEP:$(basename \"$PWD\")\" >&2",
            RunOptions::default()
                .with_working_dir(dir.path())
                .with_env("ELEBEE_STEP", "composer"),
        )
        .unwrap();
        let sink = Lines::default();
        let forwarder = StderrForwarder::new(&sink, invocation.command());
        let execution = ShellBackend.execute(&invocation, &forwarder).await;
        assert_eq!(execution.outcome, Outcome::Exited(0));
        let expected = format!(
            "composer:{}",
            dir.path().file_name().unwrap().to_string_lossy()
        );
        assert_eq!(*sink.0.lock().unwrap(), vec![expected]);
    }
}
