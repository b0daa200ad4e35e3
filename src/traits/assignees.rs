//! Issue assignee management interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Issue, User};

/// Assign and unassign users on an issue.
#[async_trait]
pub trait ManagesIssueAssignees: Send + Sync {
    /// Add one assignee, keeping the existing ones.
    async fn assign_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignee: &str,
    ) -> Result<Issue>;

    /// Add several assignees, keeping the existing ones.
    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue>;

    /// Remove the given assignees.
    async fn remove_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue>;

    /// Users that may be assigned to issues in the repository (one page).
    async fn list_assignable_users(&self, owner: &str, repo: &str) -> Result<Vec<User>>;
}
