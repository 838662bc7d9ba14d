//! Report rendering for scan results.
//!
//! Three formats: `console` (stdout), `html`, and `json` (both written to
//! fixed file names in the working directory). Rendering is split into
//! pure compose functions for testing/snapshot purposes with thin
//! printers/writers on top. All three formats agree on the grouping and
//! ordering of findings and on the total count; they differ only in
//! presentation.

use crate::models::{Finding, Summary};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::io;

/// Fixed output name for the HTML report, overwritten on each run.
pub const HTML_REPORT_FILE: &str = "bugscan_report.html";
/// Fixed output name for the JSON report, overwritten on each run.
pub const JSON_REPORT_FILE: &str = "bugscan_report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Report format selected on the command line or in config.
pub enum OutputFormat {
    Console,
    Html,
    Json,
}

impl OutputFormat {
    /// Parse a format token; unknown tokens are a configuration error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "console" => Some(Self::Console),
            "html" => Some(Self::Html),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Group findings by file path in first-encountered order; within a file
/// sort ascending by line, ties keeping original match order.
fn group_by_file(findings: &[Finding]) -> Vec<(&str, Vec<&Finding>)> {
    let mut groups: Vec<(&str, Vec<&Finding>)> = Vec::new();
    for f in findings {
        match groups.iter_mut().find(|(path, _)| *path == f.file) {
            Some((_, list)) => list.push(f),
            None => groups.push((f.file.as_str(), vec![f])),
        }
    }
    for (_, list) in &mut groups {
        list.sort_by_key(|f| f.line);
    }
    groups
}

fn summarize(findings: &[Finding]) -> Summary {
    Summary {
        files: group_by_file(findings).len(),
        findings: findings.len(),
    }
}

/// Compose the console report (pure).
pub fn compose_console(findings: &[Finding], color: bool) -> String {
    if findings.is_empty() {
        return "No potential bugs found!\n".to_string();
    }
    let mut out = String::new();
    for (file, list) in group_by_file(findings) {
        let header = if color {
            file.bold().to_string()
        } else {
            file.to_string()
        };
        out.push_str(&format!("\n{}\n{}\n", header, "-".repeat(file.len())));
        for f in list {
            let rule = if color {
                f.rule.red().to_string()
            } else {
                f.rule.clone()
            };
            let code = if color {
                f.code.yellow().to_string()
            } else {
                f.code.clone()
            };
            out.push_str(&format!("  line {}: {}\n", f.line, rule));
            out.push_str(&format!("    {}\n", f.description));
            out.push_str(&format!("    Code: {}\n\n", code));
        }
    }
    let summary = summarize(findings);
    out.push_str(&format!(
        "\nTotal potential bugs found: {}\n",
        summary.findings
    ));
    out
}

/// Escape text for use inside HTML text nodes and attribute values.
/// Scanned source routinely contains markup characters; skipping this
/// corrupts the document.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Compose the self-contained HTML report (pure).
pub fn compose_html(findings: &[Finding]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Bugscan Report</title>\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; }\n\
         h1 { color: #333; }\n\
         .file { margin-top: 20px; border-bottom: 1px solid #ccc; padding-bottom: 5px; }\n\
         .issue { margin: 10px 0; padding: 10px; background-color: #f8f8f8; border-left: 4px solid #e74c3c; }\n\
         .issue-type { color: #e74c3c; font-weight: bold; }\n\
         .issue-desc { color: #333; }\n\
         .code { background-color: #f1c40f; padding: 2px 5px; font-family: monospace; }\n\
         </style>\n</head>\n<body>\n<h1>Bugscan Report</h1>\n",
    );
    for (file, list) in group_by_file(findings) {
        html.push_str(&format!(
            "<div class=\"file\"><h2>{}</h2>\n",
            escape_html(file)
        ));
        for f in list {
            html.push_str(&format!(
                "<div class=\"issue\">\n\
                 <p>Line {}: <span class=\"issue-type\">{}</span></p>\n\
                 <p class=\"issue-desc\">{}</p>\n\
                 <p>Code: <span class=\"code\">{}</span></p>\n\
                 </div>\n",
                f.line,
                escape_html(&f.rule),
                escape_html(&f.description),
                escape_html(&f.code),
            ));
        }
        html.push_str("</div>\n");
    }
    let summary = summarize(findings);
    html.push_str(&format!(
        "<p>Total potential bugs found: {}</p>\n</body>\n</html>\n",
        summary.findings
    ));
    html
}

/// Compose the JSON report (pure): the flat finding sequence, not
/// grouped, suitable for round-trip consumption by other tools.
pub fn compose_json(findings: &[Finding]) -> JsonVal {
    serde_json::to_value(findings).unwrap_or(JsonVal::Null)
}

/// Render and deliver the report: console to stdout, html/json to their
/// fixed files with the saved name echoed to the operator.
pub fn print_report(findings: &[Finding], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Console => {
            print!("{}", compose_console(findings, utils::color_enabled()));
        }
        OutputFormat::Html => {
            std::fs::write(HTML_REPORT_FILE, compose_html(findings))?;
            println!("HTML report saved as {}", HTML_REPORT_FILE);
        }
        OutputFormat::Json => {
            let body = serde_json::to_string_pretty(&compose_json(findings))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            std::fs::write(JSON_REPORT_FILE, body)?;
            println!("JSON report saved as {}", JSON_REPORT_FILE);
        }
    }
    Ok(())
}
