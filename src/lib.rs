//! Bugscan core library.
//!
//! This crate exposes programmatic APIs for scanning files and trees with
//! a static catalog of regex bug signatures and rendering the findings.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `catalog`: Rule, RuleSet, and the compiled signature catalog.
//! - `scanner`: Per-file matching with line and snippet recovery.
//! - `walker`: Recursive traversal with exclusion and parallel scanning.
//! - `models`: Data models for findings and summaries.
//! - `output`: Console/HTML/JSON renderers and report persistence.
//! - `utils`: Supporting helpers.
//!
//! Detection is lexical pattern matching over raw text: heuristic by
//! design, with false positives and false negatives expected.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod scanner;
pub mod utils;
pub mod walker;
