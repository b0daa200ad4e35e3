//! The composite issues service.
//!
//! [`IssuesService`] binds one connector to the issue, label and assignee
//! capabilities and exposes the union of their methods by delegation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::capabilities::{
    AssigneesCapability, IssuesCapability, LabelsCapability, ASSIGNEES, ISSUES, LABELS,
};
use crate::composition::{Capability, Manifest};
use crate::connector::Connector;
use crate::error::Result;
use crate::models::{Issue, IssueListQuery, IssueUpdate, Label, NewIssue, User};
use crate::traits::{ManagesIssueAssignees, ManagesIssueLabels, ManagesIssues};

crate::assert_disjoint_capabilities!(ISSUES, LABELS, ASSIGNEES);

/// Issue, label and assignee management over one shared connector.
///
/// All three capability units hold clones of the same `Arc`, so a stateful
/// connector (token, connection pool) is observed identically by each.
///
/// # Example
///
/// ```no_run
/// use ghissues::{GithubClient, IssuesService, ManagesIssueLabels, ManagesIssues};
///
/// # async fn example() -> ghissues::Result<()> {
/// let service = IssuesService::new(GithubClient::from_env()?)?;
///
/// let issue = service.get_issue("octocat", "Hello-World", 1347).await?;
/// service
///     .add_label("octocat", "Hello-World", issue.number, "needs-triage")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct IssuesService<C: ?Sized> {
    connector: Arc<C>,
    issues: IssuesCapability<C>,
    labels: LabelsCapability<C>,
    assignees: AssigneesCapability<C>,
    manifest: Manifest,
}

impl<C: ?Sized> std::fmt::Debug for IssuesService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuesService")
            .field("capabilities", &self.manifest.capabilities())
            .finish_non_exhaustive()
    }
}

impl<C: Connector> IssuesService<C> {
    /// Build a service that takes ownership of `connector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionConflict`](crate::Error::ConstructionConflict)
    /// if the incorporated capabilities collide on a method name.
    pub fn new(connector: C) -> Result<Self> {
        Self::with_connector(Arc::new(connector))
    }
}

impl<C: Connector + ?Sized> IssuesService<C> {
    /// Build a service around a connector the caller already shares.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionConflict`](crate::Error::ConstructionConflict)
    /// if the incorporated capabilities collide on a method name.
    pub fn with_connector(connector: Arc<C>) -> Result<Self> {
        let manifest = Manifest::compose(&[ISSUES, LABELS, ASSIGNEES])?;
        tracing::debug!(capabilities = ?manifest.capabilities(), "composed issues service");

        Ok(Self {
            issues: IssuesCapability::attach(Arc::clone(&connector)),
            labels: LabelsCapability::attach(Arc::clone(&connector)),
            assignees: AssigneesCapability::attach(Arc::clone(&connector)),
            connector,
            manifest,
        })
    }

    /// The shared connector.
    pub fn connector(&self) -> &Arc<C> {
        &self.connector
    }

    /// The validated method surface.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn issues(&self) -> &IssuesCapability<C> {
        &self.issues
    }

    pub fn labels(&self) -> &LabelsCapability<C> {
        &self.labels
    }

    pub fn assignees(&self) -> &AssigneesCapability<C> {
        &self.assignees
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssues for IssuesService<C> {
    async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        self.issues.get_issue(owner, repo, number).await
    }

    async fn close_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        self.issues.close_issue(owner, repo, number).await
    }

    async fn reopen_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        self.issues.reopen_issue(owner, repo, number).await
    }

    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueListQuery,
    ) -> Result<Vec<Issue>> {
        self.issues.list_issues(owner, repo, query).await
    }

    async fn create_issue(&self, owner: &str, repo: &str, issue: &NewIssue) -> Result<Issue> {
        self.issues.create_issue(owner, repo, issue).await
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<Issue> {
        self.issues.update_issue(owner, repo, number, update).await
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssueLabels for IssuesService<C> {
    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>> {
        self.labels.add_label(owner, repo, number, label).await
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        self.labels.add_labels(owner, repo, number, labels).await
    }

    async fn replace_all_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        self.labels.replace_all_labels(owner, repo, number, labels).await
    }

    async fn list_labels(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<Label>> {
        self.labels.list_labels(owner, repo, number).await
    }

    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<Vec<Label>> {
        self.labels.remove_label(owner, repo, number, label).await
    }

    async fn remove_all_labels(&self, owner: &str, repo: &str, number: u64) -> Result<()> {
        self.labels.remove_all_labels(owner, repo, number).await
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssueAssignees for IssuesService<C> {
    async fn assign_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignee: &str,
    ) -> Result<Issue> {
        self.assignees.assign_issue(owner, repo, number, assignee).await
    }

    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue> {
        self.assignees.add_assignees(owner, repo, number, assignees).await
    }

    async fn remove_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue> {
        self.assignees
            .remove_assignees(owner, repo, number, assignees)
            .await
    }

    async fn list_assignable_users(&self, owner: &str, repo: &str) -> Result<Vec<User>> {
        self.assignees.list_assignable_users(owner, repo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{issue_json, RecordingConnector};
    use serde_json::json;

    #[test]
    fn test_units_share_one_connector() {
        let service = IssuesService::new(RecordingConnector::new()).unwrap();

        assert!(Arc::ptr_eq(service.connector(), service.issues().connector()));
        assert!(Arc::ptr_eq(service.connector(), service.labels().connector()));
        assert!(Arc::ptr_eq(service.connector(), service.assignees().connector()));
    }

    #[test]
    fn test_manifest_is_union_of_capabilities() {
        let service = IssuesService::new(RecordingConnector::new()).unwrap();
        let manifest = service.manifest();

        assert_eq!(manifest.capabilities(), &["issues", "labels", "assignees"]);
        assert_eq!(
            manifest.len(),
            ISSUES.methods.len() + LABELS.methods.len() + ASSIGNEES.methods.len()
        );
        assert_eq!(manifest.provider("close_issue"), Some("issues"));
        assert_eq!(manifest.provider("replace_all_labels"), Some("labels"));
        assert_eq!(manifest.provider("add_assignees"), Some("assignees"));
    }

    #[test]
    fn test_with_connector_reuses_callers_arc() {
        let shared = Arc::new(RecordingConnector::new());
        let first = IssuesService::with_connector(Arc::clone(&shared)).unwrap();
        let second = IssuesService::with_connector(Arc::clone(&shared)).unwrap();

        assert!(Arc::ptr_eq(first.connector(), second.connector()));
    }

    #[tokio::test]
    async fn test_calls_from_every_capability_reach_same_connector() {
        let service = IssuesService::new(
            RecordingConnector::new()
                .reply_json(issue_json(1, "t", &[]))
                .reply_json(json!([{"name": "bug"}]))
                .reply_json(issue_json(1, "t", &[])),
        )
        .unwrap();

        service.get_issue("o", "r", 1).await.unwrap();
        service.add_label("o", "r", 1, "bug").await.unwrap();
        service.assign_issue("o", "r", 1, "alice").await.unwrap();

        let paths: Vec<String> = service
            .connector()
            .requests()
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "repos/o/r/issues/1",
                "repos/o/r/issues/1/labels",
                "repos/o/r/issues/1/assignees",
            ]
        );
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let service = IssuesService::new(RecordingConnector::new()).unwrap();
        let debug = format!("{service:?}");
        assert!(debug.contains("IssuesService"));
        assert!(debug.contains("labels"));
    }
}
