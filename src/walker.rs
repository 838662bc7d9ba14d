//! Recursive tree traversal feeding the scanner.
//!
//! Excluded directory names are pruned at every depth before descent, so
//! nothing under them is ever visited. Qualifying files are scanned in
//! parallel; the ordered collect keeps output deterministic regardless of
//! worker scheduling, and the walk itself is sorted by file name so runs
//! are reproducible.

use crate::catalog::Catalog;
use crate::models::Finding;
use crate::scanner;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    // The root itself is never pruned: pointing the tool at an excluded
    // directory name is an explicit request to scan it.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| exclude.iter().any(|d| d == name))
        .unwrap_or(false)
}

fn has_allowed_extension(entry: &DirEntry, extensions: &[String]) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| extensions.iter().any(|ext| name.ends_with(ext.as_str())))
        .unwrap_or(false)
}

/// Scan every qualifying file under `root`, returning all findings plus
/// per-file diagnostics for files that could not be read or decoded.
/// One bad file never aborts the walk.
pub fn scan_tree(
    root: &Path,
    catalog: &Catalog,
    extensions: &[String],
    exclude: &[String],
) -> (Vec<Finding>, Vec<String>) {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    let walk = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, exclude));
    for entry in walk {
        match entry {
            Ok(e) if e.file_type().is_file() && has_allowed_extension(&e, extensions) => {
                files.push(e.into_path());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("skipping unreadable entry: {}", e)),
        }
    }

    let per_file: Vec<Result<Vec<Finding>, String>> = files
        .par_iter()
        .map(|path| scanner::scan_file(path, catalog))
        .collect();

    let mut findings = Vec::new();
    for result in per_file {
        match result {
            Ok(mut found) => findings.append(&mut found),
            Err(diag) => errors.push(diag),
        }
    }
    (findings, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::fs;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn defaults() -> (Vec<String>, Vec<String>) {
        let ext = crate::config::DEFAULT_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let exc = crate::config::DEFAULT_EXCLUDE
            .iter()
            .map(|s| s.to_string())
            .collect();
        (ext, exc)
    }

    #[test]
    fn test_excluded_directories_pruned_at_any_depth() {
        let cat = Catalog::compile().unwrap();
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/app.py", "eval(x)\n");
        write(dir.path(), "src/node_modules/dep.py", "eval(x)\n");
        write(dir.path(), "a/b/__pycache__/c.py", "eval(x)\n");
        let (ext, exc) = defaults();
        let (findings, errors) = scan_tree(dir.path(), &cat, &ext, &exc);
        assert!(errors.is_empty());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.ends_with("app.py"));
    }

    #[test]
    fn test_extension_allow_list_filters_files() {
        let cat = Catalog::compile().unwrap();
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.py", "eval(x)\n");
        write(dir.path(), "a.rb", "eval(x)\n");
        write(dir.path(), "notes.txt", "eval(x)\n");
        let (ext, exc) = defaults();
        let (findings, _) = scan_tree(dir.path(), &cat, &ext, &exc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.ends_with("a.py"));
    }

    #[test]
    fn test_walk_order_is_deterministic_and_lexicographic() {
        let cat = Catalog::compile().unwrap();
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.py", "eval(x)\n");
        write(dir.path(), "a.py", "eval(x)\n");
        write(dir.path(), "c.py", "eval(x)\n");
        let (ext, exc) = defaults();
        let (first, _) = scan_tree(dir.path(), &cat, &ext, &exc);
        let (second, _) = scan_tree(dir.path(), &cat, &ext, &exc);
        let files: Vec<&str> = first.iter().map(|f| f.file.as_str()).collect();
        assert!(files[0].ends_with("a.py"));
        assert!(files[1].ends_with("b.py"));
        assert!(files[2].ends_with("c.py"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_file_is_skipped_with_diagnostic() {
        let cat = Catalog::compile().unwrap();
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.py", "eval(x)\n");
        fs::write(dir.path().join("bad.py"), [0xff, 0xfe]).unwrap();
        let (ext, exc) = defaults();
        let (findings, errors) = scan_tree(dir.path(), &cat, &ext, &exc);
        assert_eq!(findings.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("bad.py"));
    }
}
