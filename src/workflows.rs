//! Higher-level workflows built on the capability interfaces.
//!
//! [`IssueWorkflows`] is implemented for every type that manages issues,
//! labels and assignees, so any composite carrying those three capabilities
//! gets triage and bulk updates for free. Steps run strictly in sequence;
//! a failure aborts the remaining steps and leaves completed ones applied.

use std::collections::HashMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::IssueState;
use crate::traits::{ManagesIssueAssignees, ManagesIssueLabels, ManagesIssues};

/// Label added when an issue mentions "urgent".
pub const URGENT_LABEL: &str = "priority:high";

/// Label added when an issue mentions "bug" (and not "urgent").
pub const BUG_LABEL: &str = "type:bug";

/// Triage settings.
///
/// Deserialises from JSON such as
/// `{"auto_assign": true, "label_assignees": {"bug": "alice"}, "auto_priority": true}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TriageConfig {
    /// Assign the issue based on its labels.
    #[serde(default)]
    pub auto_assign: bool,

    /// Label name to assignee login.
    #[serde(default)]
    pub label_assignees: HashMap<String, String>,

    /// Add a priority label based on keywords in the title and body.
    #[serde(default)]
    pub auto_priority: bool,
}

/// What triage changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    /// Login assigned, if any.
    pub assigned: Option<String>,
    /// Label added, if any.
    pub label_added: Option<String>,
}

impl TriageOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.assigned.is_none() && self.label_added.is_none()
    }
}

/// Changes applied to every issue in a bulk update. Unset fields are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BulkUpdate {
    /// Replace each issue's full label set.
    #[serde(default)]
    pub labels: Option<Vec<String>>,

    /// Add these assignees to each issue.
    #[serde(default)]
    pub assignees: Option<Vec<String>>,

    /// Close or reopen each issue.
    #[serde(default)]
    pub state: Option<IssueState>,
}

impl BulkUpdate {
    pub fn is_empty(&self) -> bool {
        self.labels.is_none() && self.assignees.is_none() && self.state.is_none()
    }
}

/// Pick the priority label for an issue's text.
///
/// Matching is case-insensitive over title and body; "urgent" wins over
/// "bug" and at most one label is chosen.
pub fn priority_label(title: &str, body: &str) -> Option<&'static str> {
    let title = title.to_lowercase();
    let body = body.to_lowercase();

    if title.contains("urgent") || body.contains("urgent") {
        Some(URGENT_LABEL)
    } else if title.contains("bug") || body.contains("bug") {
        Some(BUG_LABEL)
    } else {
        None
    }
}

/// Triage and bulk-update operations over a composite service.
#[async_trait]
pub trait IssueWorkflows: ManagesIssues + ManagesIssueLabels + ManagesIssueAssignees {
    /// Read an issue, then assign it and/or add a priority label.
    ///
    /// With `auto_assign`, the issue's labels are walked in order and the
    /// first one present in `label_assignees` decides the assignee; no
    /// further assignment is attempted. With `auto_priority`, see
    /// [`priority_label`].
    ///
    /// # Errors
    ///
    /// Propagates the first failing call; earlier changes stay applied.
    #[tracing::instrument(skip(self, config))]
    async fn triage_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        config: &TriageConfig,
    ) -> Result<TriageOutcome> {
        let issue = self.get_issue(owner, repo, number).await?;
        let mut outcome = TriageOutcome::default();

        if config.auto_assign {
            let mapped = issue
                .labels
                .iter()
                .find_map(|label| config.label_assignees.get(&label.name));
            if let Some(login) = mapped {
                tracing::info!(number, login = %login, "assigning from label");
                self.assign_issue(owner, repo, number, login).await?;
                outcome.assigned = Some(login.clone());
            }
        }

        if config.auto_priority {
            if let Some(label) = priority_label(&issue.title, issue.body_text()) {
                tracing::info!(number, label, "adding priority label");
                self.add_label(owner, repo, number, label).await?;
                outcome.label_added = Some(label.to_string());
            }
        }

        Ok(outcome)
    }

    /// Apply `update` to each issue in order.
    ///
    /// Per issue: labels are replaced, then assignees added, then the state
    /// changed. The first failure stops the run; issues already processed
    /// keep their changes and later ones are never touched.
    ///
    /// # Errors
    ///
    /// Propagates the first failing call unchanged.
    #[tracing::instrument(skip(self, update), fields(count = numbers.len()))]
    async fn bulk_update_issues(
        &self,
        owner: &str,
        repo: &str,
        numbers: &[u64],
        update: &BulkUpdate,
    ) -> Result<()> {
        for &number in numbers {
            if let Some(labels) = &update.labels {
                self.replace_all_labels(owner, repo, number, labels).await?;
            }

            if let Some(assignees) = &update.assignees {
                self.add_assignees(owner, repo, number, assignees).await?;
            }

            match update.state {
                Some(IssueState::Closed) => {
                    self.close_issue(owner, repo, number).await?;
                }
                Some(IssueState::Open) => {
                    self.reopen_issue(owner, repo, number).await?;
                }
                None => {}
            }

            tracing::debug!(number, "bulk update applied");
        }
        Ok(())
    }
}

impl<T> IssueWorkflows for T where
    T: ManagesIssues + ManagesIssueLabels + ManagesIssueAssignees + ?Sized
{
}
