//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, TimeZone, Utc};

use crate::{Issue, IssueState, Label, User};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Data loaded by [`MockServer::start`](super::MockServer::start).
pub struct DefaultScenario {
    pub owner: String,
    pub repo: String,
    pub issues: Vec<Issue>,
    pub assignable: Vec<User>,
}

fn fixture_time() -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).single()
}

impl Fixtures {
    /// Owner of the default repository.
    pub const OWNER: &'static str = "octocat";

    /// Name of the default repository.
    pub const REPO: &'static str = "Hello-World";

    // =========================================================================
    // Users and labels
    // =========================================================================

    /// A plain user account.
    pub fn user(login: &str) -> User {
        User {
            login: login.to_string(),
            id: login.bytes().map(u64::from).sum(),
            avatar_url: None,
            html_url: Some(format!("https://github.com/{login}")),
            account_type: Some("User".to_string()),
        }
    }

    /// A label with GitHub's default color for well-known names.
    pub fn label(name: &str) -> Label {
        let color = match name {
            "bug" => "d73a4a",
            "documentation" => "0075ca",
            "enhancement" => "a2eeef",
            "priority:high" => "b60205",
            _ => "ededed",
        };
        Label {
            color: Some(color.to_string()),
            ..Label::named(name)
        }
    }

    // =========================================================================
    // Issues
    // =========================================================================

    /// An open issue with no labels, assignees or body.
    pub fn issue(number: u64, title: &str) -> Issue {
        Issue {
            id: 1_000_000 + number,
            number,
            title: title.to_string(),
            body: None,
            state: IssueState::Open,
            state_reason: None,
            labels: Vec::new(),
            assignee: None,
            assignees: Vec::new(),
            user: Some(Self::user(Self::OWNER)),
            locked: false,
            comments: 0,
            html_url: None,
            pull_request: None,
            created_at: fixture_time(),
            updated_at: fixture_time(),
            closed_at: None,
        }
    }

    /// An open issue carrying labels.
    pub fn labeled_issue(number: u64, title: &str, labels: &[&str]) -> Issue {
        Issue {
            labels: labels.iter().map(|l| Self::label(l)).collect(),
            ..Self::issue(number, title)
        }
    }

    /// An issue with a body.
    pub fn issue_with_body(number: u64, title: &str, body: &str) -> Issue {
        Issue {
            body: Some(body.to_string()),
            ..Self::issue(number, title)
        }
    }

    /// A closed issue.
    pub fn closed_issue(number: u64, title: &str) -> Issue {
        Issue {
            state: IssueState::Closed,
            state_reason: Some("completed".to_string()),
            closed_at: fixture_time(),
            ..Self::issue(number, title)
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A small repository covering the triage paths.
    ///
    /// - #1 "URGENT: production crash" labeled `bug`
    /// - #2 "minor bug report", no labels
    /// - #3 "Add dark mode" labeled `enhancement`
    /// - #4 "Fix typo in README" labeled `documentation`, closed
    pub fn default_scenario() -> DefaultScenario {
        let mut docs = Self::closed_issue(4, "Fix typo in README");
        docs.labels.push(Self::label("documentation"));

        DefaultScenario {
            owner: Self::OWNER.to_string(),
            repo: Self::REPO.to_string(),
            issues: vec![
                Self::labeled_issue(1, "URGENT: production crash", &["bug"]),
                Self::issue_with_body(2, "minor bug report", "Button misaligned on Safari."),
                Self::labeled_issue(3, "Add dark mode", &["enhancement"]),
                docs,
            ],
            assignable: ["octocat", "alice", "bob"]
                .iter()
                .map(|login| Self::user(login))
                .collect(),
        }
    }
}
