// Thin wrapper around the git binary. Every operation in the tool reduces
// to one `git -C <repo> ...` invocation with captured output; nothing here
// interprets repository state beyond the read-only queries in `query`.

pub mod query;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

/// Captured result of a single git invocation.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Combined stdout and stderr, stdout first.
    pub text: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CmdOutput {
    pub fn trimmed(&self) -> &str {
        self.text.trim_end()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git executable not found on PATH")]
    NotFound,
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Locates the git binary once at startup and runs every subsequent
/// command against an explicit repository directory.
pub struct GitRunner {
    program: PathBuf,
}

impl GitRunner {
    /// Find git on PATH. Missing git is fatal for the whole program, so
    /// callers surface this before any screen is entered.
    pub fn discover() -> Result<Self, GitError> {
        let program = which::which("git").map_err(|_| GitError::NotFound)?;
        Ok(Self { program })
    }

    /// Run `git -C <repo> <args...>`, capturing combined output and exit
    /// status. A non-zero exit is not an error here; callers decide how to
    /// present it.
    pub fn run<I, S>(&self, repo: &Path, args: I) -> Result<CmdOutput, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();

        debug!(
            repo = %repo.display(),
            args = %display_args(&args),
            "running git"
        );

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(repo)
            .args(&args)
            .output()?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        if !output.status.success() {
            warn!(
                repo = %repo.display(),
                args = %display_args(&args),
                code = ?output.status.code(),
                "git exited with failure"
            );
        }

        Ok(CmdOutput {
            text,
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw passthrough arguments from an "extra options" field.
///
/// The field is deliberately permissive: the text is split on whitespace
/// and each token becomes its own git argument, unvalidated. Malformed
/// input therefore produces a git-level error, not a dialog-level one.
/// Handlers must keep these visibly separate from structured flags.
#[derive(Debug, Clone, Default)]
pub struct RawArgs(Vec<String>);

impl RawArgs {
    pub fn parse(input: &str) -> Self {
        Self(input.split_whitespace().map(str::to_owned).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_args_split_on_whitespace() {
        let raw = RawArgs::parse("  --no-ff   -X theirs ");
        assert_eq!(raw.as_slice(), ["--no-ff", "-X", "theirs"]);
    }

    #[test]
    fn raw_args_empty_input() {
        assert!(RawArgs::parse("   ").is_empty());
        assert!(RawArgs::parse("").is_empty());
    }
}
