// Common test utilities shared by the integration suites
// Fixture loading plus a wiremock-backed Datadog API

pub mod fixtures;
pub mod mocks;

use std::path::Path;

/// Names of the files directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output directory")
        .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}
