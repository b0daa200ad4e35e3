//! User model (issue authors and assignees).

use serde::{Deserialize, Serialize};

/// A GitHub account, as returned for issue authors and assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name (e.g., "octocat").
    pub login: String,

    /// Account ID.
    #[serde(default)]
    pub id: u64,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// Account kind: "User", "Organization" or "Bot".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

impl User {
    /// Whether this account is a bot (e.g., "dependabot[bot]").
    pub fn is_bot(&self) -> bool {
        self.account_type.as_deref() == Some("Bot")
    }
}
