//! Hygiene: enforces coding standards at test time.
//!
//! Scans the crate's production sources (everything under `src/` except the
//! `_test.rs` siblings) for patterns that would crash the WASM module or drop
//! a DOM error on the floor. Budgets only ever go down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics abort every controller" },
    Budget { pattern: ".expect(", max: 0, why: "panics abort every controller" },
    Budget { pattern: "panic!(", max: 0, why: "panics abort every controller" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics abort every controller" },
    Budget { pattern: "todo!(", max: 0, why: "stubs must not ship" },
    Budget { pattern: "unimplemented!(", max: 0, why: "stubs must not ship" },
    Budget { pattern: "let _ =", max: 0, why: "route DOM results through dom::log_failure" },
    Budget { pattern: ".ok()", max: 0, why: "inspect the error before dropping it" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code instead" },
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let total: usize = found.iter().map(|(_, c)| c).sum();
        if total > budget.max {
            let detail = found
                .iter()
                .map(|(path, count)| format!("    {path}: {count}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "`{}` budget exceeded: found {total}, max {} ({})\n{detail}",
                budget.pattern, budget.max, budget.why
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn every_attachable_controller_can_be_disposed() {
    let missing: Vec<String> = source_files()
        .into_iter()
        .filter(|f| f.content.contains("pub fn attach(") && !f.content.contains("pub fn dispose(self)"))
        .map(|f| f.path)
        .collect();
    assert!(missing.is_empty(), "controllers without dispose(): {missing:?}");
}

#[test]
fn test_siblings_are_wired() {
    let files = source_files();
    let mut orphans = Vec::new();
    for entry in fs::read_dir("src").into_iter().flatten().flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(stem) = name.strip_suffix("_test.rs") else {
            continue;
        };
        let wired = format!("#[path = \"{stem}_test.rs\"]");
        if !files.iter().any(|f| f.content.contains(&wired)) {
            orphans.push(name);
        }
    }
    assert!(orphans.is_empty(), "test files not included by any module: {orphans:?}");
}
