//! Custom assertions for query results

use declquery::Declaration;
use pretty_assertions::assert_eq;

pub fn names<T: Declaration>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.node().name().to_string()).collect()
}

/// Assert result names, in order
pub fn assert_names<T: Declaration>(items: &[T], expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(names(items), expected);
}
