//! Mock server state management.
//!
//! Provides the in-memory data store for the mock GitHub API server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Issue, IssueState, User};

/// State shared between the server task and the test.
pub type SharedState = Arc<RwLock<MockState>>;

/// One request seen by the server, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

/// Shared state for the mock server.
///
/// Issues are stored per repository, keyed by `owner/repo` and then by
/// issue number. Wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Issues per repository (`"owner/repo"`), ordered by number.
    pub issues: HashMap<String, BTreeMap<u64, Issue>>,

    /// Users that can be assigned, per repository.
    pub assignable: HashMap<String, Vec<User>>,

    /// Issue numbers whose endpoints answer 500.
    pub failing: HashSet<u64>,

    /// If set, every request answers 429 with this `retry-after`.
    pub rate_limit_retry_after: Option<u64>,

    /// Optional authentication token. If set, requests must carry it as a bearer token.
    pub required_token: Option<String>,

    /// Every request received, including rejected ones.
    pub requests: Vec<RecordedRequest>,
}

fn repo_key(owner: &str, repo: &str) -> String {
    format!("{owner}/{repo}")
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add an issue to a repository.
    pub fn with_issue(mut self, owner: &str, repo: &str, issue: Issue) -> Self {
        self.insert_issue(owner, repo, issue);
        self
    }

    /// Store an issue, replacing any with the same number.
    pub fn insert_issue(&mut self, owner: &str, repo: &str, mut issue: Issue) {
        if issue.html_url.is_none() {
            issue.html_url = Some(format!(
                "https://github.com/{owner}/{repo}/issues/{}",
                issue.number
            ));
        }
        self.issues
            .entry(repo_key(owner, repo))
            .or_default()
            .insert(issue.number, issue);
    }

    /// Add an assignable user to a repository.
    pub fn with_assignable(mut self, owner: &str, repo: &str, user: User) -> Self {
        self.assignable
            .entry(repo_key(owner, repo))
            .or_default()
            .push(user);
        self
    }

    /// Make every endpoint for this issue number fail with 500.
    pub fn with_failing_issue(mut self, number: u64) -> Self {
        self.failing.insert(number);
        self
    }

    /// Answer every request with 429 and `retry-after: secs`.
    pub fn with_rate_limit(mut self, retry_after_secs: u64) -> Self {
        self.rate_limit_retry_after = Some(retry_after_secs);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get an issue.
    pub fn issue(&self, owner: &str, repo: &str, number: u64) -> Option<&Issue> {
        self.issues.get(&repo_key(owner, repo))?.get(&number)
    }

    /// Get an issue for modification.
    pub fn issue_mut(&mut self, owner: &str, repo: &str, number: u64) -> Option<&mut Issue> {
        self.issues.get_mut(&repo_key(owner, repo))?.get_mut(&number)
    }

    /// Whether requests for this issue number are set to fail.
    pub fn is_failing(&self, number: u64) -> bool {
        self.failing.contains(&number)
    }

    /// List a repository's issues, newest first.
    ///
    /// `state` is `open`, `closed` or `all` (GitHub defaults to `open`).
    /// `labels` is comma-separated; an issue must carry every one.
    /// `assignee` is a login, `none` or `*`.
    pub fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: Option<&str>,
        labels: Option<&str>,
        assignee: Option<&str>,
    ) -> Vec<&Issue> {
        let Some(issues) = self.issues.get(&repo_key(owner, repo)) else {
            return Vec::new();
        };

        let wanted: Vec<&str> = labels
            .map(|l| l.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        issues
            .values()
            .rev()
            .filter(|i| match state.unwrap_or("open") {
                "all" => true,
                "closed" => i.state == IssueState::Closed,
                _ => i.state == IssueState::Open,
            })
            .filter(|i| wanted.iter().all(|name| i.has_label(name)))
            .filter(|i| match assignee {
                None => true,
                Some("none") => i.assignees.is_empty(),
                Some("*") => !i.assignees.is_empty(),
                Some(login) => i.assignees.iter().any(|u| u.login == login),
            })
            .collect()
    }

    /// Users assignable in a repository.
    pub fn assignable_users(&self, owner: &str, repo: &str) -> Vec<User> {
        self.assignable
            .get(&repo_key(owner, repo))
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve a login to a user, preferring the repository's assignable list.
    pub fn user_for(&self, owner: &str, repo: &str, login: &str) -> User {
        self.assignable
            .get(&repo_key(owner, repo))
            .and_then(|users| users.iter().find(|u| u.login == login))
            .cloned()
            .unwrap_or_else(|| super::Fixtures::user(login))
    }

    /// Next free issue number in a repository.
    pub fn next_number(&self, owner: &str, repo: &str) -> u64 {
        self.issues
            .get(&repo_key(owner, repo))
            .and_then(|issues| issues.keys().next_back().copied())
            .unwrap_or(0)
            + 1
    }

    /// Requests whose path ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<&RecordedRequest> {
        self.requests
            .iter()
            .filter(|r| r.path.ends_with(suffix))
            .collect()
    }
}

/// Record a modification: bump `updated_at` and mirror the first assignee.
pub(crate) fn touch(issue: &mut Issue) {
    issue.updated_at = Some(Utc::now());
    issue.assignee = issue.assignees.first().cloned();
}

/// Set an issue's state, keeping `closed_at` and `state_reason` in step.
pub(crate) fn apply_state(issue: &mut Issue, state: IssueState) {
    if issue.state == state {
        return;
    }
    issue.state = state;
    match state {
        IssueState::Closed => {
            issue.closed_at = Some(Utc::now());
            issue.state_reason = Some("completed".to_string());
        }
        IssueState::Open => {
            issue.closed_at = None;
            issue.state_reason = Some("reopened".to_string());
        }
    }
}
