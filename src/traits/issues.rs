//! Issue management interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Issue, IssueListQuery, IssueUpdate, NewIssue};

/// Read and change issues in a repository.
///
/// # Example
///
/// ```ignore
/// use ghissues::{GithubClient, IssuesService, ManagesIssues};
///
/// let service = IssuesService::new(GithubClient::from_env()?)?;
/// let issue = service.get_issue("octocat", "Hello-World", 1347).await?;
/// if issue.is_open() {
///     service.close_issue("octocat", "Hello-World", 1347).await?;
/// }
/// ```
#[async_trait]
pub trait ManagesIssues: Send + Sync {
    /// Fetch a single issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue does not exist or the request fails.
    async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue>;

    /// Close an issue and return its new representation.
    async fn close_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue>;

    /// Reopen a closed issue and return its new representation.
    async fn reopen_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue>;

    /// List one page of repository issues matching `query`.
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueListQuery,
    ) -> Result<Vec<Issue>>;

    /// Open a new issue.
    async fn create_issue(&self, owner: &str, repo: &str, issue: &NewIssue) -> Result<Issue>;

    /// Edit an existing issue; unset fields are left unchanged.
    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<Issue>;
}
