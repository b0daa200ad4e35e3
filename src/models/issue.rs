//! Issue model and request payloads.
//!
//! Issues are the unit every capability operates on: labels and assignees
//! are attached to them, and their state toggles between open and closed.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Label, User};

// =============================================================================
// TESTS
// =============================================================================


// =============================================================================
// IMPLEMENTATION
// =============================================================================

/// A GitHub issue.
///
/// The REST API also returns pull requests from issue endpoints; those carry
/// a `pull_request` object, see [`Issue::is_pull_request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Global issue ID.
    #[serde(default)]
    pub id: u64,

    /// Repository-scoped issue number.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body (Markdown). GitHub returns `null` for empty bodies.
    #[serde(default)]
    pub body: Option<String>,

    /// Open or closed.
    pub state: IssueState,

    /// Why the issue was closed or reopened ("completed", "not_planned", "reopened").
    #[serde(default)]
    pub state_reason: Option<String>,

    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Primary assignee (legacy single-assignee field).
    #[serde(default)]
    pub assignee: Option<User>,

    /// All assignees.
    #[serde(default)]
    pub assignees: Vec<User>,

    /// Issue author.
    #[serde(default)]
    pub user: Option<User>,

    /// Whether the conversation is locked.
    #[serde(default)]
    pub locked: bool,

    /// Number of comments.
    #[serde(default)]
    pub comments: u32,

    /// Web URL.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Present when the "issue" is actually a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    /// Whether this entry is a pull request rather than a plain issue.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Label names in the order GitHub returned them.
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Whether a label with exactly this name is attached.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    /// Logins of all assignees.
    pub fn assignee_logins(&self) -> Vec<&str> {
        self.assignees.iter().map(|u| u.login.as_str()).collect()
    }

    /// The body, or an empty string when GitHub returned none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Issue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// The issue is open.
    Open,
    /// The issue is closed.
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown issue state '{other}', expected open or closed")),
        }
    }
}

/// State filter for listing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

/// Query parameters for listing repository issues.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IssueListQuery {
    /// Filter by state (GitHub defaults to open).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateFilter>,

    /// Comma-separated label names; all must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,

    /// Assignee login, `none` or `*`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Author login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Sort key ("created", "updated", "comments").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction ("asc" or "desc").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    /// Only issues updated at or after this ISO 8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Payload for creating an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

impl NewIssue {
    /// A new issue with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Payload for editing an issue. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,

    /// Replaces the full label set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// Replaces the full assignee set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}
