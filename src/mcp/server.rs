//! MCP Server handler for GitHub Issues.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    mcp::{GetIssueParams, ListIssuesParams, TriageIssueParams, UpdateIssueParams},
    BulkUpdate, Error, GithubClient, IssueListQuery, IssueWorkflows, IssuesService, ManagesIssues,
    RemoteError, TriageConfig,
};

/// GitHub Issues MCP Server.
///
/// Implements the MCP ServerHandler trait on top of an [`IssuesService`].
///
/// # Tools
///
/// - `get_issue` - Fetch a single issue
/// - `list_issues` - List one page of repository issues
/// - `update_issue` - Replace labels, add assignees and/or change state
/// - `triage_issue` - Run keyword and label-based triage
///
/// # Example
///
/// ```no_run
/// use ghissues::mcp::GithubIssuesServer;
///
/// # fn main() -> ghissues::Result<()> {
/// let server = GithubIssuesServer::from_env()?;
/// // Server can now be used with rmcp transport
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GithubIssuesServer {
    service: Arc<IssuesService<GithubClient>>,
}

impl GithubIssuesServer {
    /// Create a server from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GITHUB_TOKEN` is not set.
    pub fn from_env() -> crate::Result<Self> {
        let client = GithubClient::from_env()?;
        Self::new(client)
    }

    /// Create a server over an existing client.
    ///
    /// # Errors
    ///
    /// Returns an error if the capability set cannot be composed.
    pub fn new(client: GithubClient) -> crate::Result<Self> {
        Ok(Self {
            service: Arc::new(IssuesService::new(client)?),
        })
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    fn to_mcp_error(err: Error) -> McpError {
        match &err {
            Error::Remote(RemoteError::Api { status: 404, .. }) => {
                McpError::resource_not_found(err.to_string(), None)
            }
            Error::ConfigMissing(msg) | Error::InvalidArgument(msg) => {
                McpError::invalid_params(msg.clone(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Handle the `get_issue` tool.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for a missing issue, `invalid_params`
    /// for an empty owner/repo or zero number.
    pub async fn handle_get_issue(
        &self,
        params: GetIssueParams,
    ) -> Result<CallToolResult, McpError> {
        let issue = self
            .service
            .get_issue(&params.owner, &params.repo, params.number)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&issue)
    }

    /// Handle the `list_issues` tool.
    pub async fn handle_list_issues(
        &self,
        params: ListIssuesParams,
    ) -> Result<CallToolResult, McpError> {
        let query = IssueListQuery {
            state: params.state,
            labels: params.labels,
            page: Some(params.page.unwrap_or(1)),
            per_page: Some(params.per_page.unwrap_or(30).min(100)),
            ..Default::default()
        };
        let issues = self
            .service
            .list_issues(&params.owner, &params.repo, &query)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&issues)
    }

    /// Handle the `update_issue` tool.
    ///
    /// Runs the same steps as a one-issue bulk update, then returns the
    /// issue as it stands afterwards.
    pub async fn handle_update_issue(
        &self,
        params: UpdateIssueParams,
    ) -> Result<CallToolResult, McpError> {
        let update = BulkUpdate {
            labels: params.labels,
            assignees: params.assignees,
            state: params.state,
        };
        if update.is_empty() {
            return Err(McpError::invalid_params(
                "update_issue needs at least one of labels, assignees or state",
                None,
            ));
        }

        self.service
            .bulk_update_issues(&params.owner, &params.repo, &[params.number], &update)
            .await
            .map_err(Self::to_mcp_error)?;

        let issue = self
            .service
            .get_issue(&params.owner, &params.repo, params.number)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&issue)
    }

    /// Handle the `triage_issue` tool.
    pub async fn handle_triage_issue(
        &self,
        params: TriageIssueParams,
    ) -> Result<CallToolResult, McpError> {
        let config = params.config.unwrap_or_else(|| TriageConfig {
            auto_priority: true,
            ..Default::default()
        });
        let outcome = self
            .service
            .triage_issue(&params.owner, &params.repo, params.number, &config)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&outcome)
    }
}

impl ServerHandler for GithubIssuesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "ghissues".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "GitHub Issues MCP Server - Read, list, label, assign and triage issues."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get_issue",
                "Fetch a single GitHub issue by owner, repo and number.",
                Self::schema::<GetIssueParams>(),
            ),
            Tool::new(
                "list_issues",
                "List one page of a repository's issues. \
                 Filters: state (open, closed, all), labels (comma-separated). \
                 Defaults: page 1, 30 per page, max 100.",
                Self::schema::<ListIssuesParams>(),
            ),
            Tool::new(
                "update_issue",
                "Update an issue: replace its labels, add assignees, and/or \
                 set state to open or closed. Returns the updated issue.",
                Self::schema::<UpdateIssueParams>(),
            ),
            Tool::new(
                "triage_issue",
                "Triage an issue: assign from a label-to-login map and add \
                 priority:high (mentions 'urgent') or type:bug (mentions 'bug').",
                Self::schema::<TriageIssueParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "get_issue" => {
                let params: GetIssueParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_get_issue(params).await
            }
            "list_issues" => {
                let params: ListIssuesParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_list_issues(params).await
            }
            "update_issue" => {
                let params: UpdateIssueParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_update_issue(params).await
            }
            "triage_issue" => {
                let params: TriageIssueParams = serde_json::from_value(args)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                self.handle_triage_issue(params).await
            }
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn issue_body(number: u64, title: &str, labels: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "id": number * 100,
            "number": number,
            "title": title,
            "state": "open",
            "labels": labels.iter().map(|l| serde_json::json!({"name": l})).collect::<Vec<_>>(),
            "assignees": []
        })
    }

    fn server_for(mock: &MockServer) -> GithubIssuesServer {
        let client = GithubClient::new("test-token", &mock.uri()).unwrap();
        GithubIssuesServer::new(client).unwrap()
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn schema_generates_for_all_params() {
        assert!(!GithubIssuesServer::schema::<GetIssueParams>().is_empty());
        assert!(!GithubIssuesServer::schema::<ListIssuesParams>().is_empty());
        assert!(!GithubIssuesServer::schema::<UpdateIssueParams>().is_empty());
        assert!(!GithubIssuesServer::schema::<TriageIssueParams>().is_empty());
    }

    #[test]
    fn server_implements_handler() {
        fn assert_server_handler<T: ServerHandler>() {}
        assert_server_handler::<GithubIssuesServer>();
    }

    #[test]
    fn not_found_maps_to_resource_not_found() {
        let err = GithubIssuesServer::to_mcp_error(
            RemoteError::Api {
                status: 404,
                message: "Not Found".to_string(),
            }
            .into(),
        );
        assert!(err.message.contains("Not Found"));

        let err = GithubIssuesServer::to_mcp_error(Error::InvalidArgument(
            "issue number must be positive".to_string(),
        ));
        assert_eq!(err.message, "issue number must be positive");
    }

    #[tokio::test]
    async fn handle_get_issue_returns_issue_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues/1347"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(issue_body(1347, "Found a bug", &["bug"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_issue(GetIssueParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                number: 1347,
            })
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let issue: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(issue["number"], 1347);
        assert_eq!(issue["labels"][0]["name"], "bug");
    }

    #[tokio::test]
    async fn handle_get_issue_missing_returns_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues/9"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_get_issue(GetIssueParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                number: 9,
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.message.contains("Not Found"));
    }

    #[tokio::test]
    async fn handle_list_issues_uses_pagination_defaults() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                issue_body(1, "First", &[]),
                issue_body(2, "Second", &["bug"])
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_list_issues(ListIssuesParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                state: None,
                labels: None,
                page: None,
                per_page: None,
            })
            .await
            .unwrap();

        let issues: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(issues.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn handle_list_issues_caps_per_page_at_100() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues"))
            .and(query_param("state", "all"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let _ = server
            .handle_list_issues(ListIssuesParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                state: Some(crate::StateFilter::All),
                labels: None,
                page: None,
                per_page: Some(500),
            })
            .await;
    }

    #[tokio::test]
    async fn handle_update_issue_closes_then_reads_back() {
        let mock_server = MockServer::start().await;

        let mut closed = issue_body(5, "Stale", &[]);
        closed["state"] = serde_json::json!("closed");

        Mock::given(method("PATCH"))
            .and(path("/repos/octocat/Hello-World/issues/5"))
            .and(body_json(serde_json::json!({"state": "closed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&closed))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&closed))
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_update_issue(UpdateIssueParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                number: 5,
                labels: None,
                assignees: None,
                state: Some(crate::IssueState::Closed),
            })
            .await
            .unwrap();

        let issue: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(issue["state"], "closed");
    }

    #[tokio::test]
    async fn handle_update_issue_without_changes_is_rejected() {
        let mock_server = MockServer::start().await;
        let server = server_for(&mock_server);

        let err = server
            .handle_update_issue(UpdateIssueParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                number: 5,
                labels: None,
                assignees: None,
                state: None,
            })
            .await
            .unwrap_err();

        assert!(err.message.contains("at least one"));
    }

    #[tokio::test]
    async fn handle_triage_issue_defaults_to_priority_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World/issues/3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(issue_body(3, "URGENT: crash", &["bug"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/repos/octocat/Hello-World/issues/3/labels"))
            .and(body_json(serde_json::json!({"labels": ["priority:high"]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"name": "bug"}, {"name": "priority:high"}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let server = server_for(&mock_server);
        let result = server
            .handle_triage_issue(TriageIssueParams {
                owner: "octocat".to_string(),
                repo: "Hello-World".to_string(),
                number: 3,
                config: None,
            })
            .await
            .unwrap();

        let outcome: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(outcome["label_added"], "priority:high");
        assert!(outcome["assigned"].is_null());
    }
}
