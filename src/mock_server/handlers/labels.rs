//! Issue label endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{error_response, locate, locate_mut};
use crate::mock_server::state::{touch, SharedState};
use crate::mock_server::Fixtures;

/// Request body for adding or replacing labels.
#[derive(Debug, Default, Deserialize)]
pub struct LabelsBody {
    #[serde(default)]
    pub labels: Vec<String>,
}

/// GET /repos/{owner}/{repo}/issues/{number}/labels
pub async fn list_labels(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> Response {
    let state = state.read().await;

    match locate(&state, &owner, &repo, number) {
        Ok(issue) => (StatusCode::OK, Json(issue.labels.clone())).into_response(),
        Err(response) => response,
    }
}

/// POST /repos/{owner}/{repo}/issues/{number}/labels
pub async fn add_labels(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<LabelsBody>,
) -> Response {
    let mut state = state.write().await;
    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    for name in &body.labels {
        if !issue.has_label(name) {
            issue.labels.push(Fixtures::label(name));
        }
    }
    touch(issue);

    (StatusCode::OK, Json(issue.labels.clone())).into_response()
}

/// PUT /repos/{owner}/{repo}/issues/{number}/labels
pub async fn set_labels(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<LabelsBody>,
) -> Response {
    let mut state = state.write().await;
    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    issue.labels = body.labels.iter().map(|l| Fixtures::label(l)).collect();
    touch(issue);

    (StatusCode::OK, Json(issue.labels.clone())).into_response()
}

/// DELETE /repos/{owner}/{repo}/issues/{number}/labels
pub async fn remove_all_labels(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> Response {
    let mut state = state.write().await;
    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    issue.labels.clear();
    touch(issue);

    StatusCode::NO_CONTENT.into_response()
}

/// DELETE /repos/{owner}/{repo}/issues/{number}/labels/{name}
pub async fn remove_label(
    State(state): State<SharedState>,
    Path((owner, repo, number, name)): Path<(String, String, u64, String)>,
) -> Response {
    let mut state = state.write().await;
    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    if !issue.has_label(&name) {
        return error_response(StatusCode::NOT_FOUND, "Label does not exist");
    }
    issue.labels.retain(|l| l.name != name);
    touch(issue);

    (StatusCode::OK, Json(issue.labels.clone())).into_response()
}
