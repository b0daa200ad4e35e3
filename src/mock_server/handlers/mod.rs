//! HTTP request handlers for the mock server.

pub mod assignees;
pub mod issues;
pub mod labels;

pub use assignees::*;
pub use issues::*;
pub use labels::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::mock_server::state::MockState;
use crate::Issue;

/// GitHub-shaped error body.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "message": message.into(),
            "documentation_url": "https://docs.github.com/rest/issues"
        })),
    )
        .into_response()
}

fn injected_failure(number: u64) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Injected failure for issue #{number}"),
    )
}

/// Find an issue, honouring injected failures.
pub(crate) fn locate<'a>(
    state: &'a MockState,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<&'a Issue, Response> {
    if state.is_failing(number) {
        return Err(injected_failure(number));
    }
    state
        .issue(owner, repo, number)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Not Found"))
}

/// Find an issue for modification, honouring injected failures.
pub(crate) fn locate_mut<'a>(
    state: &'a mut MockState,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<&'a mut Issue, Response> {
    if state.is_failing(number) {
        return Err(injected_failure(number));
    }
    state
        .issue_mut(owner, repo, number)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "Not Found"))
}
