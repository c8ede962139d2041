//! Dependency installation.
//!
//! Runs the package manager inside the generated application with stdio
//! inherited, so the operator sees its output live. This is the pipeline's
//! only recoverable stage; callers downgrade a failure to a manual step.

use std::path::Path;
use std::process::Command;

use crate::core::error::InstallError;

/// Package manager used by the generated application.
pub const INSTALL_TOOL: &str = "yarn";

/// Install dependencies inside `target`.
pub fn run(target: &Path) -> Result<(), InstallError> {
    run_tool(INSTALL_TOOL, target)
}

fn run_tool(tool: &str, target: &Path) -> Result<(), InstallError> {
    let status = Command::new(tool)
        .arg("install")
        .current_dir(target)
        .status()
        .map_err(|e| InstallError::ToolUnavailable {
            tool: tool.to_string(),
            source: e,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(InstallError::Failed {
            tool: tool.to_string(),
            status,
        })
    }
}
