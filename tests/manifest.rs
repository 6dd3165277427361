//! Manifest checks: every optional crate the `csr` feature pulls in must be
//! referenced somewhere under `src/`.

use std::fs;
use std::path::Path;

fn manifest() -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")).unwrap_or_default()
}

fn csr_optional_deps(manifest: &str) -> Vec<String> {
    manifest
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("\"dep:")?;
            let name = rest.split('"').next()?;
            Some(name.to_owned())
        })
        .collect()
}

fn collect_sources(dir: &Path, out: &mut String) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push_str(&content);
                out.push('\n');
            }
        }
    }
}

// =============================================================
// optional dependencies
// =============================================================

#[test]
fn csr_feature_lists_optional_deps() {
    let deps = csr_optional_deps(&manifest());
    assert!(deps.iter().any(|d| d == "web-sys"), "csr feature not found: {deps:?}");
}

#[test]
fn every_csr_dependency_is_used() {
    let mut sources = String::new();
    collect_sources(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut sources);

    let unused: Vec<String> = csr_optional_deps(&manifest())
        .into_iter()
        .filter(|dep| !sources.contains(&format!("{}::", dep.replace('-', "_"))))
        .collect();

    assert!(unused.is_empty(), "csr dependencies never referenced from src/: {unused:?}");
}

#[test]
fn spawn_local_comes_from_leptos() {
    assert!(!manifest().contains("wasm-bindgen-futures"));
}
