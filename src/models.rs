//! Shared data models for scan results.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One concrete match of one rule in one file at one line. Plain value
/// record; identical duplicates are legal and both retained.
pub struct Finding {
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub rule: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Aggregated totals used by the console footer.
pub struct Summary {
    pub files: usize,
    pub findings: usize,
}
