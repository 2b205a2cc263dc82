//! Header assertion helpers.

use http::HeaderMap;

/// Assert that `headers` carries exactly `expected` values for `name`, in
/// order.
pub fn assert_header_values(headers: &HeaderMap, name: &str, expected: &[&str]) {
    let actual: Vec<String> = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();
    assert_eq!(actual, expected, "header `{name}` mismatch");
}

/// Assert that `headers` carries a single `expected` value for `name`.
pub fn assert_single_header(headers: &HeaderMap, name: &str, expected: &str) {
    assert_header_values(headers, name, &[expected]);
}

/// Assert that `name` does not appear in `headers` at all.
pub fn assert_header_absent(headers: &HeaderMap, name: &str) {
    assert!(
        !headers.contains_key(name),
        "header `{name}` unexpectedly present: {headers:?}"
    );
}
