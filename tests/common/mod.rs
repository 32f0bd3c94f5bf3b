//! Shared test utilities for integration tests

#![allow(dead_code)]

use shapeql::{parser, Registry, SelectionSpec};

/// Load a test fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Registry {
    let path = format!("tests/test_data/{}", name);
    parser::load_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Validate and resolve `spec` against `object`, rendering the shape
pub fn shape_string(registry: &Registry, object: &str, spec: &SelectionSpec) -> String {
    let object = registry
        .object(object)
        .unwrap_or_else(|e| panic!("Missing object: {}", e));
    object
        .shape(spec)
        .unwrap_or_else(|e| panic!("Shape failed: {}", e))
        .resolved_shape()
        .to_string()
}

/// A spec nesting `friends` `depth` times around `{name: true}`
pub fn friends_chain(depth: usize) -> SelectionSpec {
    let mut spec = SelectionSpec::new().include("name");
    for _ in 0..depth {
        spec = SelectionSpec::new().nested("friends", spec);
    }
    spec
}
