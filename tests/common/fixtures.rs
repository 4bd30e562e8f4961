// Fixture loading utilities for test data
// Provides functions to load JSON test fixtures from files

use serde_json::Value;
use std::fs;

/// Load a JSON fixture from the tests/fixtures/ directory
///
/// # Panics
/// Panics if the fixture file doesn't exist or contains invalid JSON
pub fn load_fixture(name: &str) -> Value {
    let content = load_fixture_str(name);

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {} as JSON: {}", name, e))
}

/// Load a fixture file as a raw string (not parsed as JSON)
pub fn load_fixture_str(name: &str) -> String {
    let fixture_path = format!("{}/tests/fixtures/{}.json", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("Failed to read fixture file: {}", fixture_path))
}
