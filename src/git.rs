//! Git command runner for touchline.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. All git invocations go through this module.

use crate::error::{Result, TouchlineError};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use tracing::debug;

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(TouchlineError::GitError)` - If git cannot be started or exits non-zero
///
/// # Examples
///
/// ```no_run
/// use touchline::git::run_git;
/// use std::path::Path;
///
/// let output = run_git(Path::new("."), &["rev-parse", "HEAD"])?;
/// println!("HEAD is {}", output.stdout);
/// # Ok::<(), touchline::error::TouchlineError>(())
/// ```
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    debug!(cwd = %cwd.display(), ?args, "running git");

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| spawn_error(args, e))?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };
        Err(exit_error(args, output.status.code(), &error_msg))
    }
}

/// Run a git command and collect the stdout lines accepted by `keep`.
///
/// Stdout is streamed line by line, so rejected lines are never buffered.
/// Stderr is drained on a separate thread to keep the child from blocking.
pub fn run_git_lines<P, F>(cwd: P, args: &[&str], keep: F) -> Result<Vec<String>>
where
    P: AsRef<Path>,
    F: Fn(&str) -> bool,
{
    let cwd = cwd.as_ref();
    debug!(cwd = %cwd.display(), ?args, "streaming git output");

    let mut child = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(args, e))?;

    let stderr_reader = child.stderr.take().map(|mut stderr| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).trim().to_string()
        })
    });

    let mut lines = Vec::new();
    let mut read_error = None;
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).split(b'\n') {
            match line {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let text = text.strip_suffix('\r').unwrap_or(&text);
                    if keep(text) {
                        lines.push(text.to_string());
                    }
                }
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }
        }
    }

    let status = child
        .wait()
        .map_err(|e| TouchlineError::GitError(format!("failed to wait for git: {e}")))?;
    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if !status.success() {
        return Err(exit_error(args, status.code(), &stderr));
    }
    if let Some(e) = read_error {
        return Err(TouchlineError::GitError(format!(
            "failed to read output of git {}: {e}",
            args.first().unwrap_or(&"")
        )));
    }

    Ok(lines)
}

/// Find the merge-base of `HEAD` and `target` (e.g. `origin/main`).
pub fn merge_base<P: AsRef<Path>>(cwd: P, target: &str) -> Result<String> {
    let output = run_git(cwd, &["merge-base", "HEAD", target])?;
    if output.is_empty() {
        return Err(TouchlineError::GitError(format!(
            "git merge-base HEAD {target} returned no commit"
        )));
    }
    Ok(output.stdout)
}

fn spawn_error(args: &[&str], e: std::io::Error) -> TouchlineError {
    TouchlineError::GitError(format!(
        "failed to execute git {}: {} (is git installed?)",
        args.first().unwrap_or(&""),
        e
    ))
}

fn exit_error(args: &[&str], code: Option<i32>, message: &str) -> TouchlineError {
    TouchlineError::GitError(format!(
        "git {} failed (exit code {}): {}",
        args.first().unwrap_or(&""),
        code.unwrap_or(-1),
        message
    ))
}
