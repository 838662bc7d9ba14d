//! Static catalog of bug signatures and per-extension rule selection.
//!
//! Rules live in three declared tables: a `base` set applied to every
//! file, plus Python and JS/TS extension sets merged on top of the base
//! for matching extensions. The catalog is compiled once at startup and
//! is read-only afterwards; a pattern that fails to compile is a fatal
//! configuration error, never a scan-time one.
//!
//! The `regex` engine has no lookaround and no backreferences, so rules
//! that need "matched, unless X is also present" carry an explicit
//! `reject` pattern: the scanner drops a match when the reject pattern
//! also matches the line containing the match start.

use regex::Regex;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
/// Fatal catalog construction failures.
pub enum CatalogError {
    #[error("rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: &'static str,
        source: regex::Error,
    },
}

/// One detection rule: id, compiled pattern, optional reject pattern,
/// and the description attached verbatim to every finding.
#[derive(Clone)]
pub struct Rule {
    pub id: &'static str,
    pub pattern: Regex,
    pub reject: Option<Regex>,
    pub description: &'static str,
}

/// Declared form of a rule: (id, pattern, reject, description).
type RuleSpec = (&'static str, &'static str, Option<&'static str>, &'static str);

const BASE_RULES: &[RuleSpec] = &[
    (
        "memory_leak",
        r"\bmalloc\s*\([^\n]+\)",
        Some(r"free"),
        "Possible memory leak: allocation without a matching free",
    ),
    (
        "null_pointer",
        r"\w+\s*=\s*(?:NULL|0)[^\n]*\n[^\n]*\w+\s*->",
        None,
        "Possible NULL pointer dereference",
    ),
    (
        "buffer_overflow",
        r"\b(?:strcpy|strcat|gets)\s*\(",
        None,
        "Buffer overflow risk: use strncpy, strncat or fgets",
    ),
    (
        "uninitialized_var",
        r"(?m)^[ \t]*(?:int|char|short|long|float|double|unsigned)[ \t]+\w+[ \t]*;",
        None,
        "Variable declared without an initializer may be used uninitialized",
    ),
    (
        "division_by_zero",
        r"(?m)/\s*0(?:[^.\w]|$)",
        None,
        "Possible division by zero",
    ),
    (
        "integer_overflow",
        r"\b(?:int|short|long)\s+\w+\s*=\s*(?:INT_MAX|SHRT_MAX|LONG_MAX)\s*\+",
        None,
        "Integer overflow risk from arithmetic on a maximum constant",
    ),
    (
        "format_string",
        r"\bprintf\s*\(\s*\w+\s*\)",
        None,
        "Format string vulnerability: use printf(\"%s\", var)",
    ),
    (
        "resource_leak",
        r"\b(?:fopen|open|socket)\s*\([^\n]+\)",
        Some(r"close"),
        "Possible resource leak: resource opened without a matching close",
    ),
    (
        "race_condition",
        r"\b(?:pthread_create|std::thread)[^\n]*(?:shared|global)",
        None,
        "Potential race condition on shared state",
    ),
    (
        "sql_injection",
        r"\b(?:execute|query)\s*\([^\n]*\+[^\n]*\)",
        None,
        "Possible SQL injection: use parameterized queries",
    ),
    (
        "infinite_loop",
        r"\bwhile\s*\(\s*(?:1|true)\s*\)",
        Some(r"\bbreak\b"),
        "Potential infinite loop: no break in sight",
    ),
    (
        "exception_swallow",
        r"catch\s*\([^)]*\)\s*\{\s*\}",
        None,
        "Exception caught and silently swallowed",
    ),
];

const PYTHON_RULES: &[RuleSpec] = &[
    (
        "except_all",
        r"(?m)^[ \t]*except\s*:",
        None,
        "Avoid bare 'except:', catch specific exceptions",
    ),
    (
        "mutable_default",
        r"\bdef\s+\w+\s*\([^)]*=\s*(?:\[\]|\{\}|\(\))",
        None,
        "Mutable default argument can leak state between calls",
    ),
    (
        "global_var",
        r"(?m)^[ \t]*global[ \t]+\w+",
        None,
        "Use of 'global' can cause unwanted side effects",
    ),
    (
        "eval_usage",
        r"\beval\s*\(",
        None,
        "Use of eval() is potentially dangerous",
    ),
    (
        "shell_injection",
        r"os\.system\s*\([^\n]*\+[^\n]*\)|subprocess\.call\s*\([^\n]*shell\s*=\s*True[^\n]*\+",
        None,
        "Possible shell command injection",
    ),
    (
        "duplicate_keys",
        r"\{[^\n{}]*:[^\n{}]*,[^\n{}]*:[^\n{}]*\}",
        None,
        "Check this dict literal for duplicate keys",
    ),
];

const JS_RULES: &[RuleSpec] = &[
    (
        "loose_equality",
        r"(?m)(?:[^=!<>\n]|^)(?:==|!=)(?:[^=]|$)",
        None,
        "Use === and !== instead of == and != to avoid type coercion",
    ),
    (
        "global_leak",
        r"(?m)^[ \t]*\w+[ \t]*=[^=\n]",
        Some(r"\b(?:var|let|const)\b"),
        "Possible implicit global: declare with var, let or const",
    ),
    (
        "promise_no_catch",
        r"\.then\s*\([^\n]*\)",
        Some(r"\.catch"),
        "Promise chain without a .catch() handler",
    ),
    (
        "alert_debug",
        r"\balert\s*\(",
        None,
        "alert() found, remove before production",
    ),
    (
        "eval_usage",
        r"\beval\s*\(",
        None,
        "Use of eval() is potentially dangerous",
    ),
];

#[derive(Clone, Default)]
/// Ordered collection of rules. Iteration order is declaration order,
/// which also fixes the order findings are emitted per file.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile a declared rule table into a set.
    fn from_specs(specs: &[RuleSpec]) -> Result<Self, CatalogError> {
        let mut rules = Vec::with_capacity(specs.len());
        for &(id, pattern, reject, description) in specs {
            let pattern = Regex::new(pattern)
                .map_err(|source| CatalogError::InvalidPattern { id, source })?;
            let reject = match reject {
                Some(r) => Some(
                    Regex::new(r)
                        .map_err(|source| CatalogError::InvalidPattern { id, source })?,
                ),
                None => None,
            };
            rules.push(Rule {
                id,
                pattern,
                reject,
                description,
            });
        }
        Ok(Self { rules })
    }

    /// Merge `overlay` onto `self`: same-id rules replace the existing
    /// entry in place (override, not union), new rules are appended in
    /// their declared order.
    pub fn merge(&self, overlay: &RuleSet) -> RuleSet {
        let mut rules = self.rules.clone();
        for rule in &overlay.rules {
            match rules.iter_mut().find(|r| r.id == rule.id) {
                Some(existing) => *existing = rule.clone(),
                None => rules.push(rule.clone()),
            }
        }
        RuleSet { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The complete, immutable collection of rule sets. Built once at
/// process start; `select` picks the merged set for a file.
pub struct Catalog {
    base: RuleSet,
    python_ext: RuleSet,
    js_ext: RuleSet,
    python: RuleSet,
    js: RuleSet,
}

impl Catalog {
    /// Compile every declared table and pre-merge the per-language
    /// selections. Fails fast on the first malformed pattern.
    pub fn compile() -> Result<Self, CatalogError> {
        let base = RuleSet::from_specs(BASE_RULES)?;
        let python_ext = RuleSet::from_specs(PYTHON_RULES)?;
        let js_ext = RuleSet::from_specs(JS_RULES)?;
        let python = base.merge(&python_ext);
        let js = base.merge(&js_ext);
        Ok(Self {
            base,
            python_ext,
            js_ext,
            python,
            js,
        })
    }

    /// Pick the rule set for a file by its extension: `.py` gets the
    /// Python selection, `.js/.ts/.jsx/.tsx` the JS selection, anything
    /// else base only.
    pub fn select(&self, path: &Path) -> &RuleSet {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => &self.python,
            Some("js" | "ts" | "jsx" | "tsx") => &self.js,
            _ => &self.base,
        }
    }

    pub fn base(&self) -> &RuleSet {
        &self.base
    }

    /// Extension-only sets with their display labels, for `bugscan rules`.
    pub fn extension_sets(&self) -> [(&'static str, &RuleSet); 2] {
        [
            ("python (.py)", &self.python_ext),
            ("js (.js, .ts, .jsx, .tsx)", &self.js_ext),
        ]
    }
}
