//! Pipeline orchestration.
//!
//! One run walks five stages in a fixed order: extract the template archive,
//! apply the rule tree, materialize the backend variant, install
//! dependencies, report. The first three are fatal on failure and
//! short-circuit with the failing stage identified; installation is the
//! single recoverable stage, and reporting always runs once the tree is
//! fully materialized.

use std::fmt;
use std::path::Path;

use crate::install;
use crate::report::{self, Reporter};
use crate::template;

use super::builder;
use super::engine;
use super::error::{InstallError, SetupError, StageError};
use super::params::BootstrapParams;
use super::variants;

// ============================================================================
// Stages and outcomes
// ============================================================================

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Substitute,
    Materialize,
    Install,
    Report,
}

impl Stage {
    /// Whether a failure in this stage aborts the run. Install failures
    /// degrade into a manual step instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Stage::Install)
    }

    /// Task line shown by reporters.
    pub fn describe(&self) -> &'static str {
        match self {
            Stage::Extract => "Copy template files",
            Stage::Substitute => "Apply bootstrap substitutions",
            Stage::Materialize => "Select backend variant files",
            Stage::Install => "Install dependencies",
            Stage::Report => "Final instructions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Substitute => "substitute",
            Stage::Materialize => "materialize",
            Stage::Install => "install",
            Stage::Report => "report",
        };
        write!(f, "{name}")
    }
}

/// Terminal state of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything ran, including dependency installation.
    Completed,
    /// The tree is fully materialized but the operator must install
    /// dependencies themselves.
    CompletedWithManualStep,
}

// ============================================================================
// Run
// ============================================================================

/// Run the full pipeline for one application.
///
/// `package` is the template archive to extract. Fatal stage failures leave
/// the partially built target directory as-is for inspection.
pub fn run(
    params: &BootstrapParams,
    package: &Path,
    reporter: &dyn Reporter,
) -> Result<Outcome, SetupError> {
    run_with_installer(params, package, reporter, install::run)
}

/// Pipeline body with the installer injected; tests substitute a stub so no
/// package manager has to be on the machine.
pub(crate) fn run_with_installer(
    params: &BootstrapParams,
    package: &Path,
    reporter: &dyn Reporter,
    installer: impl FnOnce(&Path) -> Result<(), InstallError>,
) -> Result<Outcome, SetupError> {
    reporter.verbose(&format!(
        "materializing {} into {}",
        params.backend,
        params.target_dir.display()
    ));

    run_fatal(Stage::Extract, reporter, || {
        template::extract(package, &params.target_dir).map_err(StageError::from)
    })?;

    run_fatal(Stage::Substitute, reporter, || {
        let tree = builder::build(params);
        reporter.verbose(&format!("{} replacements staged", tree.active_rules()));
        engine::apply(&tree, &params.target_dir).map_err(StageError::from)
    })?;

    run_fatal(Stage::Materialize, reporter, || {
        variants::materialize(&params.target_dir, params.backend).map_err(StageError::from)
    })?;

    let outcome = run_install(params, reporter, installer);

    report::final_instructions(params, outcome, reporter);

    Ok(outcome)
}

/// Execute one fatal stage, reporting its lifecycle.
fn run_fatal(
    stage: Stage,
    reporter: &dyn Reporter,
    step: impl FnOnce() -> Result<(), StageError>,
) -> Result<(), SetupError> {
    reporter.stage_started(stage);
    match step() {
        Ok(()) => {
            reporter.stage_completed(stage);
            Ok(())
        }
        Err(source) => Err(SetupError { stage, source }),
    }
}

/// Execute the recoverable install stage.
fn run_install(
    params: &BootstrapParams,
    reporter: &dyn Reporter,
    installer: impl FnOnce(&Path) -> Result<(), InstallError>,
) -> Outcome {
    if !params.install {
        reporter.stage_skipped(Stage::Install, "disabled for this run");
        return Outcome::CompletedWithManualStep;
    }

    reporter.stage_started(Stage::Install);
    match installer(&params.target_dir) {
        Ok(()) => {
            reporter.stage_completed(Stage::Install);
            Outcome::Completed
        }
        Err(e) => {
            reporter.warning(&format!(
                "Dependency installation failed ({e}); install them manually."
            ));
            Outcome::CompletedWithManualStep
        }
    }
}
