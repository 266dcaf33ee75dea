//! Command execution utilities for driving iproute2.
//!
//! Commands are given as an argument vector and executed directly, without
//! an intermediate shell, so next-hop addresses and device names never need
//! quoting.
//!
//! # Example
//!
//! ```ignore
//! use nhmgr_common::shell;
//!
//! let argv = vec!["ip".to_string(), "nexthop".to_string(), "show".to_string()];
//! let output = shell::run_command(&argv).await?;
//! ```

use std::io::{self, Read};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{NhMgrError, NhMgrResult};

/// Default name of the iproute2 `ip` program, resolved on PATH.
pub const IP_CMD: &str = "ip";

/// Joins an argument vector into the command text used in logs and errors.
pub fn render_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success, -1 = killed by signal).
    pub exit_code: i32,
    /// stdout and stderr as written to one shared pipe, untrimmed.
    pub output: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes a command and reports its exit code and combined output.
///
/// stdout and stderr are attached to the same pipe, so the output keeps the
/// order in which the child wrote it. A non-zero exit code is not an error at
/// this layer; only a failure to launch the program or collect its output is.
///
/// # Returns
///
/// * `Ok(ExecResult)` - The command execution result
/// * `Err(NhMgrError::EmptyCommand)` - If `argv` is empty
/// * `Err(NhMgrError::ShellExec)` - If the command could not be spawned
pub async fn exec(argv: &[String]) -> NhMgrResult<ExecResult> {
    let (program, args) = argv.split_first().ok_or(NhMgrError::EmptyCommand)?;
    let command = render_command(argv);
    let exec_err = |e: io::Error| NhMgrError::ShellExec {
        command: command.clone(),
        source: e,
    };

    tracing::debug!(command = %command, "Executing command");

    let (mut reader, writer) = io::pipe().map_err(exec_err)?;
    let err_writer = writer.try_clone().map_err(exec_err)?;

    // The Command owns the parent's copies of the write end; it must be
    // dropped before reading or the reader never sees EOF.
    let mut child = {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(err_writer));
        cmd.spawn().map_err(exec_err)?
    };

    let collect = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map(|_| buf)
    });

    let status = child.wait().await.map_err(exec_err)?;
    let bytes = collect
        .await
        .map_err(io::Error::other)
        .and_then(|read| read)
        .map_err(exec_err)?;

    let result = ExecResult {
        exit_code: status.code().unwrap_or(-1),
        output: String::from_utf8_lossy(&bytes).into_owned(),
    };

    tracing::debug!(
        command = %command,
        exit_code = result.exit_code,
        "Command finished"
    );

    Ok(result)
}

/// Runs a command and returns its combined stdout and stderr.
///
/// A non-zero exit becomes [`NhMgrError::ShellCommandFailed`], which carries
/// the joined command text, the exit code and the captured output.
pub async fn run_command(argv: &[String]) -> NhMgrResult<String> {
    let result = exec(argv).await?;
    if result.success() {
        Ok(result.output)
    } else {
        Err(NhMgrError::ShellCommandFailed {
            command: render_command(argv),
            exit_code: result.exit_code,
            output: result.output,
        })
    }
}

/// Checks whether `name` resolves to an executable.
///
/// Bare names are searched on PATH; names containing a path separator are
/// checked directly.
pub fn is_command_available(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Seam between command construction and process execution.
///
/// [`ShellRunner`] spawns real processes; tests substitute a recorder.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `argv` to completion, returning its combined output.
    async fn run(&self, argv: &[String]) -> NhMgrResult<String>;
}

/// [`CommandRunner`] backed by [`run_command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, argv: &[String]) -> NhMgrResult<String> {
        run_command(argv).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_command() {
        let cmd = argv(&["ip", "route", "delete", "to", "10.0.0.0/24"]);
        assert_eq!(render_command(&cmd), "ip route delete to 10.0.0.0/24");
    }

    #[test]
    fn test_exec_result_success() {
        let ok = ExecResult {
            exit_code: 0,
            output: String::new(),
        };
        let failed = ExecResult {
            exit_code: 2,
            output: "Error: Nexthop id already exists.\n".to_string(),
        };
        assert!(ok.success());
        assert!(!failed.success());
    }

    #[tokio::test]
    async fn test_exec_empty_argv() {
        let result = exec(&[]).await;
        assert!(matches!(result, Err(NhMgrError::EmptyCommand)));
    }

    #[tokio::test]
    async fn test_exec_echo() {
        let result = exec(&argv(&["echo", "hello"])).await.unwrap();
        assert!(result.success());
        assert_eq!(result.output, "hello\n");
    }

    #[tokio::test]
    async fn test_exec_exit_code() {
        let result = exec(&argv(&["sh", "-c", "exit 42"])).await.unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, 42);
        assert_eq!(result.output, "");
    }

    #[tokio::test]
    async fn test_exec_interleaves_streams() {
        let result = exec(&argv(&["sh", "-c", "echo a >&2; echo b; echo c >&2"]))
            .await
            .unwrap();
        assert_eq!(result.output, "a\nb\nc\n");
    }

    #[tokio::test]
    async fn test_run_command_no_shell_expansion() {
        let output = run_command(&argv(&["echo", "$HOME"])).await.unwrap();
        assert_eq!(output, "$HOME\n");
    }

    #[tokio::test]
    async fn test_run_command_spawn_failure() {
        let result = run_command(&argv(&["nhmgr-no-such-binary", "x"])).await;
        match result {
            Err(NhMgrError::ShellExec { command, .. }) => {
                assert_eq!(command, "nhmgr-no-such-binary x");
            }
            other => panic!("Expected ShellExec error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shell_runner() {
        let output = ShellRunner.run(&argv(&["echo", "nhid"])).await.unwrap();
        assert_eq!(output, "nhid\n");
    }

    #[test]
    fn test_is_command_available() {
        assert!(is_command_available("sh"));
        assert!(!is_command_available("nhmgr-no-such-binary"));
    }
}
