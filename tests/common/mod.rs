#![allow(dead_code)]

pub use procgate_test_utils::init_tracing;

/// Owned argument vector from string literals.
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
