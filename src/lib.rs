//! # SQL Review Library
//!
//! Rule engine that checks SQL statements against coding-standard policies.
//!
//! # Modules
//!
//! - [`syntax`] - SQL parsing into the review tree
//! - [`schema`] - Rule catalog, presets and stored/template conversion
//! - [`advisor`] - Per-dialect rule checkers, registry and policy evaluator
//! - [`config`] - Configuration loading
//! - [`output`] - Result formatting
//! - [`error`] - Error types and constructors

pub mod advisor;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod schema;
pub mod syntax;
