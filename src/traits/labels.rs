//! Issue label management interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Label;

/// Attach, replace and remove labels on an issue.
///
/// Every method returning `Vec<Label>` yields the issue's full label set
/// after the change, as reported by GitHub.
#[async_trait]
pub trait ManagesIssueLabels: Send + Sync {
    /// Add a single label, keeping the existing ones.
    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>>;

    /// Add several labels at once, keeping the existing ones.
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>>;

    /// Replace the issue's full label set.
    async fn replace_all_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>>;

    /// List the labels currently on the issue.
    async fn list_labels(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Label>>;

    /// Remove one label.
    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>>;

    /// Remove every label from the issue.
    async fn remove_all_labels(&self, owner: &str, repo: &str, number: u64) -> Result<()>;
}
