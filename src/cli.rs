//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bugscan",
    version,
    about = "Heuristic bug pattern scanner",
    long_about = "Bugscan — a small, fast scanner that matches a catalog of regex bug signatures against source trees and reports findings as console text, HTML, or JSON.\n\nConfiguration precedence: CLI > bugscan.toml > defaults.",
    after_help = "Examples:\n  bugscan scan src/\n  bugscan scan app.py --format json\n  bugscan scan . --extensions .py .js --exclude node_modules dist\n  bugscan rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning and catalog inspection.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current bugscan version.")]
    Version,
    /// Scan a file or directory tree for bug patterns
    #[command(
        about = "Scan a file or directory",
        long_about = "Apply the bug signature catalog to the target. Rule sets are selected per file by extension; directories are walked recursively with excluded directory names pruned at every depth.",
        after_help = "Examples:\n  bugscan scan src/\n  bugscan scan src/ --format html\n  bugscan scan main.c --format console"
    )]
    Scan {
        #[arg(help = "Path of the file or directory to scan")]
        path: String,
        #[arg(
            short = 'e',
            long,
            num_args = 1..,
            help = "File extensions to scan (default: .c .cpp .h .hpp .py .js .java .php)"
        )]
        extensions: Option<Vec<String>>,
        #[arg(
            short = 'x',
            long,
            num_args = 1..,
            help = "Directory names to exclude (default: node_modules venv __pycache__ .git)"
        )]
        exclude: Option<Vec<String>>,
        #[arg(short = 'f', long, help = "Report format: console|html|json (default: console)")]
        format: Option<String>,
    },
    /// List the rule catalog
    #[command(
        about = "List detection rules",
        long_about = "Print every rule in the catalog: the base set applied to all files and the per-language extension sets."
    )]
    Rules,
}
