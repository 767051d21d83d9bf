//! Problem Details test helpers
//!
//! Assertions for the backend's RFC 7807 error contract that do not depend
//! on backend types, so they can be shared by unit and integration tests.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local mirror of the backend's problem details body.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that raw response parts conform to the error contract and return
/// the parsed body for further checks.
///
/// Checks:
/// - HTTP status matches `expected_status`
/// - `Content-Type` is `application/problem+json`
/// - `x-trace-id` header exists and equals the body `trace_id`
/// - 401 responses carry `WWW-Authenticate: Bearer`
/// - `code` matches and, when given, `detail` contains the expected text
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem: ProblemDetailsLike = serde_json::from_slice(body_bytes)
        .expect("Response body should be valid ProblemDetails JSON");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    if expected_status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(challenge, "Bearer", "401 must carry WWW-Authenticate: Bearer");
    } else {
        assert!(
            headers.get(WWW_AUTHENTICATE).is_none(),
            "only 401 responses carry WWW-Authenticate"
        );
    }

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{}', but got '{}'",
            expected_detail,
            problem.detail
        );
    }

    problem
}

/// Same as [`assert_problem_details_from_parts`] for an actix test response.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_detail_contains,
    )
}
