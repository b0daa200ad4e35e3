//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{IssueState, StateFilter, TriageConfig};

/// Parameters for the `get_issue` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetIssueParams {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue number.
    pub number: u64,
}

/// Parameters for the `list_issues` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListIssuesParams {
    pub owner: String,
    pub repo: String,
    /// State filter (open, closed, all). Defaults to open.
    #[serde(default)]
    pub state: Option<StateFilter>,
    /// Comma-separated label names; issues must carry all of them.
    #[serde(default)]
    pub labels: Option<String>,
    /// Page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,
    /// Number of items per page (max 100).
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Parameters for the `update_issue` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    /// Replace the full label set.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Logins to add as assignees.
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    /// Target state (open or closed).
    #[serde(default)]
    pub state: Option<IssueState>,
}

/// Parameters for the `triage_issue` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TriageIssueParams {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    /// Triage settings; defaults to keyword priority only.
    #[serde(default)]
    pub config: Option<TriageConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_issue_params_schema_generates() {
        let schema = schemars::schema_for!(GetIssueParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("owner"));
        assert!(json.contains("repo"));
        assert!(json.contains("number"));
    }

    #[test]
    fn list_issues_params_schema_has_state_variants() {
        let schema = schemars::schema_for!(ListIssuesParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("per_page"));
        assert!(json.contains("closed"));
        assert!(json.contains("all"));
    }

    #[test]
    fn triage_params_schema_includes_config() {
        let schema = schemars::schema_for!(TriageIssueParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("label_assignees"));
        assert!(json.contains("auto_priority"));
    }

    #[test]
    fn list_issues_params_deserializes_with_defaults() {
        let json = r#"{"owner": "octocat", "repo": "Hello-World"}"#;
        let params: ListIssuesParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.owner, "octocat");
        assert!(params.state.is_none());
        assert!(params.labels.is_none());
        assert!(params.page.is_none());
    }

    #[test]
    fn update_issue_params_deserializes() {
        let json = r#"{
            "owner": "octocat",
            "repo": "Hello-World",
            "number": 7,
            "labels": ["bug"],
            "state": "closed"
        }"#;
        let params: UpdateIssueParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.number, 7);
        assert_eq!(params.labels, Some(vec!["bug".to_string()]));
        assert_eq!(params.state, Some(IssueState::Closed));
        assert!(params.assignees.is_none());
    }

    #[test]
    fn triage_params_deserializes_nested_config() {
        let json = r#"{
            "owner": "octocat",
            "repo": "Hello-World",
            "number": 1,
            "config": {"auto_assign": true, "label_assignees": {"bug": "alice"}}
        }"#;
        let params: TriageIssueParams = serde_json::from_str(json).unwrap();
        let config = params.config.unwrap();
        assert!(config.auto_assign);
        assert!(!config.auto_priority);
        assert_eq!(config.label_assignees["bug"], "alice");
    }
}
