// traits.rs - Common trait for out-of-process collaborators

use crate::error::{MarkerError, Result};
use std::fmt::Debug;
use std::path::Path;
use std::process::Command;

/// An external program run once per gene (aligner) or once per batch (search).
///
/// Implementations only describe the command line; spawning, exit status
/// handling and stdout capture are shared.
pub trait ExternalTool: Send + Sync + Debug {
    /// Short tool name used in logs and errors
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Command turning `input` into `output`
    fn command(&self, input: &Path, output: &Path) -> Command;

    /// Whether the tool writes its result to stdout instead of `output`
    fn captures_stdout(&self) -> bool {
        false
    }

    /// Run the tool for `target`. Spawn failures and non-zero exits become
    /// `ExternalToolFailure`; nothing is retried.
    fn run(&self, target: &str, input: &Path, output: &Path) -> Result<()> {
        let failure = |detail: String| MarkerError::ExternalToolFailure {
            tool: self.name().to_string(),
            target: target.to_string(),
            detail,
        };

        if !input.exists() {
            return Err(MarkerError::MissingFile(input.to_path_buf()));
        }
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| MarkerError::io(parent, e))?;
            }
        }

        let mut command = self.command(input, output);
        let result = command
            .output()
            .map_err(|e| failure(format!("could not start {:?}: {}", command.get_program(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let last_line = stderr.lines().last().unwrap_or("").trim();
            return Err(failure(format!("{} {}", result.status, last_line).trim().to_string()));
        }

        if self.captures_stdout() {
            std::fs::write(output, &result.stdout).map_err(|e| MarkerError::io(output, e))?;
        }
        Ok(())
    }
}
