//! Supporting helpers: colored stderr prefixes for operator diagnostics.

use owo_colors::OwoColorize;

/// Colors are enabled unless the `NO_COLOR` convention says otherwise.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if color_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if color_enabled() {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

pub fn note_prefix() -> String {
    if color_enabled() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}
