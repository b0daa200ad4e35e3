//! Assignee capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{issue_path, repo_path, require_non_empty};
use crate::composition::{Capability, CapabilityDescriptor};
use crate::connector::{fetch, ApiRequest, Connector};
use crate::error::Result;
use crate::models::{Issue, User};
use crate::traits::ManagesIssueAssignees;

/// Methods contributed by [`AssigneesCapability`].
pub const ASSIGNEES: CapabilityDescriptor = CapabilityDescriptor {
    name: "assignees",
    methods: &[
        "assign_issue",
        "add_assignees",
        "remove_assignees",
        "list_assignable_users",
    ],
};

/// [`ManagesIssueAssignees`] over a shared connector.
pub struct AssigneesCapability<C: ?Sized> {
    connector: Arc<C>,
}

impl<C: ?Sized> Clone for AssigneesCapability<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for AssigneesCapability<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssigneesCapability").finish_non_exhaustive()
    }
}

impl<C: Connector + ?Sized> Capability for AssigneesCapability<C> {
    type Connector = C;
    const DESCRIPTOR: CapabilityDescriptor = ASSIGNEES;

    fn attach(connector: Arc<C>) -> Self {
        Self { connector }
    }

    fn connector(&self) -> &Arc<C> {
        &self.connector
    }
}

fn assignees_path(owner: &str, repo: &str, number: u64) -> Result<String> {
    Ok(format!("{}/assignees", issue_path(owner, repo, number)?))
}

#[async_trait]
impl<C: Connector + ?Sized> ManagesIssueAssignees for AssigneesCapability<C> {
    #[tracing::instrument(skip(self))]
    async fn assign_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignee: &str,
    ) -> Result<Issue> {
        require_non_empty("assignee", assignee)?;
        let path = assignees_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::post(path, json!({ "assignees": [assignee] })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue> {
        let path = assignees_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::post(path, json!({ "assignees": assignees })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> Result<Issue> {
        let path = assignees_path(owner, repo, number)?;
        fetch(
            self.connector.as_ref(),
            ApiRequest::delete_with_body(path, json!({ "assignees": assignees })),
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_assignable_users(&self, owner: &str, repo: &str) -> Result<Vec<User>> {
        let path = format!("{}/assignees", repo_path(owner, repo)?);
        fetch(self.connector.as_ref(), ApiRequest::get(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_descriptor_covers, issue_json, RecordingConnector};
    use reqwest::Method;

    fn capability(
        connector: RecordingConnector,
    ) -> (AssigneesCapability<RecordingConnector>, Arc<RecordingConnector>) {
        let connector = Arc::new(connector);
        (AssigneesCapability::attach(Arc::clone(&connector)), connector)
    }

    #[tokio::test]
    async fn test_assign_issue_posts_one_login() {
        let mut assigned = issue_json(4, "t", &[]);
        assigned["assignees"] = json!([{"login": "alice", "id": 1}]);
        let (assignees, connector) = capability(RecordingConnector::new().reply_json(assigned));

        let issue = assignees.assign_issue("octo", "hello", 4, "alice").await.unwrap();
        assert_eq!(issue.assignee_logins(), vec!["alice"]);

        let requests = connector.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "repos/octo/hello/issues/4/assignees");
        assert_eq!(requests[0].body, Some(json!({"assignees": ["alice"]})));
    }

    #[tokio::test]
    async fn test_add_assignees_posts_all_logins() {
        let (assignees, connector) =
            capability(RecordingConnector::new().reply_json(issue_json(4, "t", &[])));

        let logins = vec!["alice".to_string(), "bob".to_string()];
        assignees.add_assignees("octo", "hello", 4, &logins).await.unwrap();

        let requests = connector.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, Some(json!({"assignees": ["alice", "bob"]})));
    }

    #[tokio::test]
    async fn test_remove_assignees_deletes_with_body() {
        let (assignees, connector) =
            capability(RecordingConnector::new().reply_json(issue_json(4, "t", &[])));

        let logins = vec!["bob".to_string()];
        assignees.remove_assignees("octo", "hello", 4, &logins).await.unwrap();

        let requests = connector.requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].body, Some(json!({"assignees": ["bob"]})));
    }

    #[tokio::test]
    async fn test_list_assignable_users() {
        let (assignees, connector) = capability(RecordingConnector::new().reply_json(json!([
            {"login": "alice", "id": 1},
            {"login": "bob", "id": 2}
        ])));

        let users = assignees.list_assignable_users("octo", "hello").await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(connector.requests()[0].path, "repos/octo/hello/assignees");
    }

    #[tokio::test]
    async fn test_descriptor_matches_trait_surface() {
        let (assignees, connector) = capability(RecordingConnector::new());
        let unit: &dyn ManagesIssueAssignees = &assignees;
        let logins = ["alice".to_string()];

        let _ = unit.assign_issue("octo", "hello", 1, "alice").await;
        let _ = unit.add_assignees("octo", "hello", 1, &logins).await;
        let _ = unit.remove_assignees("octo", "hello", 1, &logins).await;
        let _ = unit.list_assignable_users("octo", "hello").await;

        let exercised = [
            "assign_issue",
            "add_assignees",
            "remove_assignees",
            "list_assignable_users",
        ];
        assert_eq!(connector.requests().len(), exercised.len());
        assert_descriptor_covers(ASSIGNEES, &exercised);
    }
}
