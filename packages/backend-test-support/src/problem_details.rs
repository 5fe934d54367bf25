//! Problem Details test helpers
//!
//! Assertions over the serialized error body the engine hands to callers,
//! written against JSON so tests do not depend on backend types.

use serde::Deserialize;

/// Local mirror of the backend's problem body.
#[derive(Debug, Deserialize)]
struct ProblemDetailsLike {
    code: String,
    detail: String,
}

/// Assert that `body` is a problem with `expected_code`.
///
/// When `expected_detail_contains` is given the detail must contain it.
pub fn assert_problem_details(
    body: &serde_json::Value,
    expected_code: &str,
    expected_detail_contains: Option<&str>,
) {
    let problem: ProblemDetailsLike = serde_json::from_value(body.clone())
        .unwrap_or_else(|e| panic!("body should be ProblemDetails JSON ({e}): {body}"));

    assert_eq!(problem.code, expected_code);

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{}', but got '{}'",
            expected_detail,
            problem.detail
        );
    }
}
