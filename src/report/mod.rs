//! Progress reporting.
//!
//! The pipeline talks to an explicit [`Reporter`] sink instead of
//! process-global logging state, so runs stay silent under test and callers
//! choose the verbosity. Reporters are never consulted for control flow.

use std::path::Path;

use colored::Colorize;

use crate::core::params::BootstrapParams;
use crate::core::pipeline::{Outcome, Stage};

/// Sink for human-readable progress and diagnostics.
pub trait Reporter {
    /// A pipeline stage is starting.
    fn stage_started(&self, stage: Stage);
    /// A pipeline stage finished successfully.
    fn stage_completed(&self, stage: Stage);
    /// A stage was skipped, with the reason.
    fn stage_skipped(&self, stage: Stage, reason: &str);
    /// Something went wrong that the run survives.
    fn warning(&self, message: &str);
    /// A command the operator should run.
    fn instruction(&self, command: &str);
    /// Plain informational line.
    fn note(&self, message: &str);
    /// Diagnostic detail, shown only in verbose runs.
    fn verbose(&self, message: &str);
}

/// Terminal reporter. Color handling is left to the `colored` crate, which
/// honors `NO_COLOR` and non-tty output.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> ConsoleReporter {
        ConsoleReporter { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn stage_started(&self, stage: Stage) {
        if self.verbose {
            println!("{}", format!("→ {}", stage.describe()).dimmed());
        }
    }

    fn stage_completed(&self, stage: Stage) {
        println!("{} {}", "✓".green(), stage.describe());
    }

    fn stage_skipped(&self, stage: Stage, reason: &str) {
        println!("{} {} ({})", "-".yellow(), stage.describe(), reason);
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn instruction(&self, command: &str) {
        println!("    {}", command.cyan());
    }

    fn note(&self, message: &str) {
        println!("{message}");
    }

    fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{}", message.dimmed());
        }
    }
}

/// Print the post-run instructions the operator needs to start the app.
///
/// Always runs once the tree is materialized; a manual-step outcome adds the
/// install command the pipeline could not run for them.
pub fn final_instructions(params: &BootstrapParams, outcome: Outcome, reporter: &dyn Reporter) {
    reporter.note("");
    reporter.note(&format!(
        "Success! Application \"{}\" was created.",
        params.app_name
    ));
    reporter.note("You can start it with:");
    reporter.instruction(&format!("cd {}", display_dir(&params.target_dir)));
    if outcome == Outcome::CompletedWithManualStep {
        reporter.instruction("yarn install");
    }
    reporter.instruction("yarn start");
}

/// Target directory relative to the working directory when possible; easier
/// to type than the absolute form.
fn display_dir(target: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(rel) = target.strip_prefix(&cwd) {
            if !rel.as_os_str().is_empty() {
                return rel.display().to_string();
            }
        }
    }
    target.display().to_string()
}

/// Captures every reported line for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    lines: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    /// True when any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }

    /// All recorded lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn stage_started(&self, stage: Stage) {
        self.push(format!("start {stage}"));
    }

    fn stage_completed(&self, stage: Stage) {
        self.push(format!("done {stage}"));
    }

    fn stage_skipped(&self, stage: Stage, reason: &str) {
        self.push(format!("skip {stage}: {reason}"));
    }

    fn warning(&self, message: &str) {
        self.push(format!("warn {message}"));
    }

    fn instruction(&self, command: &str) {
        self.push(format!("cmd {command}"));
    }

    fn note(&self, message: &str) {
        self.push(format!("note {message}"));
    }

    fn verbose(&self, message: &str) {
        self.push(format!("verbose {message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::Backend;
    use std::path::PathBuf;

    fn params() -> BootstrapParams {
        BootstrapParams {
            app_name: "myapp".to_string(),
            target_dir: PathBuf::from("/somewhere/else/myapp"),
            hostname: None,
            backend: Backend::Classic,
            verbose: false,
            install: true,
        }
    }

    #[test]
    fn test_completed_run_omits_the_install_command() {
        let reporter = RecordingReporter::default();
        final_instructions(&params(), Outcome::Completed, &reporter);

        assert!(reporter.contains("Success!"));
        assert!(reporter.contains("cd "));
        assert!(reporter.contains("yarn start"));
        assert!(!reporter.contains("yarn install"));
    }

    #[test]
    fn test_manual_step_outcome_adds_the_install_command() {
        let reporter = RecordingReporter::default();
        final_instructions(&params(), Outcome::CompletedWithManualStep, &reporter);

        let lines = reporter.lines();
        let install = lines.iter().position(|l| l == "cmd yarn install");
        let start = lines.iter().position(|l| l == "cmd yarn start");
        assert!(install.is_some());
        assert!(start.is_some());
        assert!(install < start, "install must be suggested before start");
    }

    #[test]
    fn test_instructions_name_the_application() {
        let reporter = RecordingReporter::default();
        final_instructions(&params(), Outcome::Completed, &reporter);
        assert!(reporter.contains("\"myapp\""));
    }
}
