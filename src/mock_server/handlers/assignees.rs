//! Assignee endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::locate_mut;
use crate::mock_server::state::{touch, SharedState};

/// Request body for adding or removing assignees.
#[derive(Debug, Default, Deserialize)]
pub struct AssigneesBody {
    #[serde(default)]
    pub assignees: Vec<String>,
}

/// POST /repos/{owner}/{repo}/issues/{number}/assignees
pub async fn add_assignees(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<AssigneesBody>,
) -> Response {
    let mut state = state.write().await;

    let users: Vec<_> = body
        .assignees
        .iter()
        .map(|login| state.user_for(&owner, &repo, login))
        .collect();

    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    for user in users {
        if !issue.assignees.iter().any(|u| u.login == user.login) {
            issue.assignees.push(user);
        }
    }
    touch(issue);

    (StatusCode::CREATED, Json(issue.clone())).into_response()
}

/// DELETE /repos/{owner}/{repo}/issues/{number}/assignees
pub async fn remove_assignees(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(body): Json<AssigneesBody>,
) -> Response {
    let mut state = state.write().await;
    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    issue
        .assignees
        .retain(|u| !body.assignees.iter().any(|login| *login == u.login));
    touch(issue);

    (StatusCode::OK, Json(issue.clone())).into_response()
}

/// GET /repos/{owner}/{repo}/assignees
pub async fn list_assignees(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;
    (StatusCode::OK, Json(state.assignable_users(&owner, &repo))).into_response()
}
