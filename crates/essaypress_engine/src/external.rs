use std::env;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Failure talking to an external converter binary. Fatal for the stage;
/// later stages are not attempted. No retries: a misconfigured tool is a
/// setup problem, not a transient one.
#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("required tool `{0}` not found on PATH")]
    MissingTool(String),
    #[error("no markdown articles in {}; run fetch first", .0.display())]
    EmptyCorpus(PathBuf),
    #[error("missing input {}; run the producing stage first", .0.display())]
    MissingInput(PathBuf),
    #[error("`{tool}` exited with status {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: i32,
        stderr: String,
    },
    #[error("`{tool}` did not finish within {timeout:?}")]
    TimedOut { tool: String, timeout: Duration },
    #[error("failed to launch `{tool}`: {source}")]
    Launch {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// What one subprocess invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Narrow subprocess seam so the converter stages can run against a fake in
/// tests without invoking real binaries. `tool` is the bare binary name;
/// locating it is the runner's business.
#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput, ExternalToolError>;
}

/// Runs the real binary via `tokio::process`, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct SystemToolRunner {
    timeout: Duration,
}

impl SystemToolRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, tool: &str, args: &[String]) -> Result<ToolOutput, ExternalToolError> {
        let program = resolve_tool(tool)?;
        log::debug!("running `{}` with {} args", program.display(), args.len());
        let child = Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ExternalToolError::TimedOut {
                tool: tool.to_string(),
                timeout: self.timeout,
            })?
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    ExternalToolError::MissingTool(tool.to_string())
                } else {
                    ExternalToolError::Launch {
                        tool: tool.to_string(),
                        source: err,
                    }
                }
            })?;

        Ok(ToolOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Locate `name` on PATH before invoking it, so a missing binary produces a
/// clear error instead of a confusing launch failure mid-stage.
pub fn resolve_tool(name: &str) -> Result<PathBuf, ExternalToolError> {
    let path = env::var_os("PATH").unwrap_or_default();
    resolve_tool_from(env::split_paths(&path), name)
        .ok_or_else(|| ExternalToolError::MissingTool(name.to_string()))
}

/// PATH scan over an explicit directory list; split out for tests.
pub fn resolve_tool_from(
    dirs: impl IntoIterator<Item = PathBuf>,
    name: &str,
) -> Option<PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
