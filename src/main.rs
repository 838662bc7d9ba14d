//! Bugscan CLI binary entry point.
//! Compiles the catalog, resolves configuration, dispatches the scan,
//! and prints the report.

mod catalog;
mod cli;
mod config;
mod models;
mod output;
mod scanner;
mod utils;
mod walker;

use catalog::Catalog;
use clap::Parser;
use cli::{Cli, Commands};
use output::OutputFormat;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Rules => {
            let catalog = compile_catalog_or_exit();
            println!("base (all files):");
            for rule in catalog.base().iter() {
                println!("  {:<20} {}", rule.id, rule.description);
            }
            for (label, set) in catalog.extension_sets() {
                println!("{}:", label);
                for rule in set.iter() {
                    println!("  {:<20} {}", rule.id, rule.description);
                }
            }
        }
        Commands::Scan {
            path,
            extensions,
            exclude,
            format,
        } => {
            let target = Path::new(&path);
            let start_dir = if target.is_dir() {
                target.to_path_buf()
            } else {
                std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf())
            };
            let config_root = config::detect_config_root(&start_dir);
            if config::load_config(&config_root).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No bugscan.toml found; using defaults."
                );
            }
            let eff = config::resolve_effective(
                &start_dir,
                extensions,
                exclude,
                format.as_deref(),
            );
            let format = match OutputFormat::parse(&eff.format) {
                Some(f) => f,
                None => {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("unknown format '{}' (expected console|html|json)", eff.format)
                    );
                    std::process::exit(2);
                }
            };
            let catalog = compile_catalog_or_exit();

            let (findings, errors) = if target.is_file() {
                match scanner::scan_file(target, &catalog) {
                    Ok(found) => (found, Vec::new()),
                    Err(diag) => (Vec::new(), vec![diag]),
                }
            } else if target.is_dir() {
                walker::scan_tree(target, &catalog, &eff.extensions, &eff.exclude)
            } else {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("path '{}' does not exist", path)
                );
                std::process::exit(2);
            };

            for diag in &errors {
                eprintln!("{} {}", utils::warn_prefix(), diag);
            }
            if let Err(e) = output::print_report(&findings, format) {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("failed to write report: {}", e)
                );
                std::process::exit(2);
            }
        }
    }
}

fn compile_catalog_or_exit() -> Catalog {
    match Catalog::compile() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}
