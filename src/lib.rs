//! Plantilla — application scaffolding from packaged templates.
//!
//! Deterministic text substitutions driven by bootstrap parameters, then
//! variant-aware structural edits, then dependency installation. One rule
//! tree per run, one read-modify-write per file.

pub mod cli;
pub mod core;
pub mod install;
pub mod report;
pub mod template;
