//! Issue endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{error_response, locate, locate_mut};
use crate::mock_server::state::{apply_state, touch, SharedState};
use crate::mock_server::Fixtures;
use crate::{Issue, IssueUpdate, NewIssue};

/// Query parameters for listing issues.
#[derive(Debug, Default, Deserialize)]
pub struct ListIssuesQuery {
    pub state: Option<String>,
    pub labels: Option<String>,
    pub assignee: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /repos/{owner}/{repo}/issues
pub async fn list_issues(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<ListIssuesQuery>,
) -> Response {
    let state = state.read().await;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(30).clamp(1, 100);

    let all_issues = state.list_issues(
        &owner,
        &repo,
        query.state.as_deref(),
        query.labels.as_deref(),
        query.assignee.as_deref(),
    );

    // Apply pagination
    let start = ((page - 1) * per_page) as usize;
    let issues: Vec<Issue> = all_issues
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect();

    (StatusCode::OK, Json(issues)).into_response()
}

/// POST /repos/{owner}/{repo}/issues
pub async fn create_issue(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Json(new_issue): Json<NewIssue>,
) -> Response {
    if new_issue.title.trim().is_empty() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed");
    }

    let mut state = state.write().await;
    let number = state.next_number(&owner, &repo);

    let mut issue = Fixtures::issue(number, &new_issue.title);
    issue.body = new_issue.body;
    issue.labels = new_issue.labels.iter().map(|l| Fixtures::label(l)).collect();
    issue.assignees = new_issue
        .assignees
        .iter()
        .map(|login| state.user_for(&owner, &repo, login))
        .collect();
    issue.created_at = Some(Utc::now());
    touch(&mut issue);

    state.insert_issue(&owner, &repo, issue);
    match state.issue(&owner, &repo, number) {
        Some(issue) => (StatusCode::CREATED, Json(issue.clone())).into_response(),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "issue vanished"),
    }
}

/// GET /repos/{owner}/{repo}/issues/{number}
pub async fn get_issue(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> Response {
    let state = state.read().await;

    match locate(&state, &owner, &repo, number) {
        Ok(issue) => (StatusCode::OK, Json(issue.clone())).into_response(),
        Err(response) => response,
    }
}

/// PATCH /repos/{owner}/{repo}/issues/{number}
pub async fn update_issue(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    Json(update): Json<IssueUpdate>,
) -> Response {
    let mut state = state.write().await;

    let assignees = update.assignees.as_ref().map(|logins| {
        logins
            .iter()
            .map(|login| state.user_for(&owner, &repo, login))
            .collect::<Vec<_>>()
    });

    let issue = match locate_mut(&mut state, &owner, &repo, number) {
        Ok(issue) => issue,
        Err(response) => return response,
    };

    if let Some(title) = update.title {
        issue.title = title;
    }
    if let Some(body) = update.body {
        issue.body = Some(body);
    }
    if let Some(labels) = update.labels {
        issue.labels = labels.iter().map(|l| Fixtures::label(l)).collect();
    }
    if let Some(assignees) = assignees {
        issue.assignees = assignees;
    }
    if let Some(target) = update.state {
        apply_state(issue, target);
    }
    touch(issue);

    (StatusCode::OK, Json(issue.clone())).into_response()
}
