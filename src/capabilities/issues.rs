//! Issue capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{issue_path, repo_path};
use crate::composition::{Capability, CapabilityDescriptor};
use crate::connector::{encode_body, fetch, ApiRequest, Connector};
use crate::error::Result;
use crate::models::{Issue, IssueListQuery, IssueState, IssueUpdate, NewIssue};
use crate::traits::ManagesIssues;

/// Methods contributed by [`IssuesCapability`].
pub const ISSUES: CapabilityDescriptor = CapabilityDescriptor {
    name: "issues",
    methods: &[
        "get_issue",
        "close_issue",
        "reopen_issue",
        "list_issues",
        "create_issue",
        "update_issue",
    ],
};

/// [`ManagesIssues`] over a shared connector.
pub struct IssuesCapability<C: ?Sized> {
    connector: Arc<C>,
}

impl<C: ?Sized> Clone for IssuesCapability<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for IssuesCapability<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuesCapability").finish_non_exhaustive()
    }
}

impl<C: Connector + ?Sized> Capability for IssuesCapability<C> {
    type Connector = C;
    const DESCRIPTOR: CapabilityDescriptor = ISSUES;

    fn attach(connector: Arc<C>) -> Self {
        Self { connector }
    }

    fn connector(&self) -> &Arc<C> {
        &self.connector
    }
}

impl<C: Connector + ?Sized> IssuesCapability<C> {
    async fn set_state(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        state: IssueState,
    ) -> Result<Issue> {
        let path = issue_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::patch(path, json!({ "state": state })),
        )
        .await
    }
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssues for IssuesCapability<C> {
    #[tracing::instrument(skip(self))]
    async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        let path = issue_path(owner, repo, number)?;
        fetch(self.connector.as_ref(), ApiRequest::get(path)).await
    }

    #[tracing::instrument(skip(self))]
    async fn close_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        self.set_state(owner, repo, number, IssueState::Closed).await
    }

    #[tracing::instrument(skip(self))]
    async fn reopen_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        self.set_state(owner, repo, number, IssueState::Open).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        query: &IssueListQuery,
    ) -> Result<Vec<Issue>> {
        let path = format!("{}/issues", repo_path(owner, repo)?);
        let request = ApiRequest::get(path).with_query(query)?;
        fetch(self.connector.as_ref(), request).await
    }

    #[tracing::instrument(skip(self, issue), fields(title = %issue.title))]
    async fn create_issue(&self, owner: &str, repo: &str, issue: &NewIssue) -> Result<Issue> {
        let path = format!("{}/issues", repo_path(owner, repo)?);
        let body = encode_body(issue)?;
        fetch(self.connector.as_ref(), ApiRequest::post(path, body)).await
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<Issue> {
        let path = issue_path(owner, repo, number)?;
        let body = encode_body(update)?;
        fetch(self.connector.as_ref(), ApiRequest::patch(path, body)).await
    }
}
