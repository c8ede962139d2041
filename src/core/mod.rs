//! Core materialization logic — parameters, rules, tree building, the
//! substitution engine, variant edits, pipeline orchestration.

pub mod builder;
pub mod engine;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod rules;
pub mod variants;
