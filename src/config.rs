//! Configuration discovery and effective settings resolution.
//!
//! Bugscan reads `bugscan.toml|yaml|yml` from the start directory (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `extensions`: `.c .cpp .h .hpp .py .js .java .php`
//! - `exclude`: `node_modules venv __pycache__ .git`
//! - `format`: `console`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions scanned when neither CLI nor config names any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".c", ".cpp", ".h", ".hpp", ".py", ".js", ".java", ".php",
];

/// Directory names pruned from the walk when neither CLI nor config
/// names any.
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules", "venv", "__pycache__", ".git"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `bugscan.toml|yaml`.
pub struct BugscanConfig {
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub format: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the scan command.
pub struct Effective {
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub format: String,
}

/// Walk upward from `start` to find the directory holding a
/// `bugscan.toml|yaml|yml` or a `.git` directory; falls back to `start`.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("bugscan.toml").exists()
            || cur.join("bugscan.yaml").exists()
            || cur.join("bugscan.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BugscanConfig` from `bugscan.toml` or `bugscan.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<BugscanConfig> {
    let toml_path = root.join("bugscan.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: BugscanConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["bugscan.yaml", "bugscan.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: BugscanConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults, starting discovery from `start_dir`.
pub fn resolve_effective(
    start_dir: &Path,
    cli_extensions: Option<Vec<String>>,
    cli_exclude: Option<Vec<String>>,
    cli_format: Option<&str>,
) -> Effective {
    let root = detect_config_root(start_dir);
    let cfg = load_config(&root).unwrap_or_default();

    let extensions = cli_extensions
        .or(cfg.extensions)
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect());
    let exclude = cli_exclude
        .or(cfg.exclude)
        .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect());
    let format = cli_format
        .map(|s| s.to_string())
        .or(cfg.format)
        .unwrap_or_else(|| "console".to_string());

    Effective {
        extensions,
        exclude,
        format,
    }
}
