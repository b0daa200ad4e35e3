//! Capability implementations.
//!
//! One unit per interface in [`crate::traits`]. A unit holds only the shared
//! connector handle it was attached with; each method validates its target,
//! builds exactly one [`ApiRequest`](crate::ApiRequest) and returns the
//! decoded response, propagating connector failures untouched.

mod assignees;
mod issues;
mod labels;

pub use assignees::{AssigneesCapability, ASSIGNEES};
pub use issues::{IssuesCapability, ISSUES};
pub use labels::{LabelsCapability, LABELS};

use crate::error::{Error, Result};

fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// `repos/{owner}/{repo}` with both segments percent-encoded.
pub(crate) fn repo_path(owner: &str, repo: &str) -> Result<String> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    Ok(format!(
        "repos/{}/{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    ))
}

/// `repos/{owner}/{repo}/issues/{number}`.
pub(crate) fn issue_path(owner: &str, repo: &str, number: u64) -> Result<String> {
    if number == 0 {
        return Err(Error::InvalidArgument(
            "issue number must be positive".to_string(),
        ));
    }
    Ok(format!("{}/issues/{number}", repo_path(owner, repo)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_path() {
        assert_eq!(
            issue_path("octocat", "Hello-World", 1347).unwrap(),
            "repos/octocat/Hello-World/issues/1347"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(
            repo_path("my org", "repo/evil").unwrap(),
            "repos/my%20org/repo%2Fevil"
        );
    }

    #[test]
    fn test_invalid_targets_rejected() {
        assert!(matches!(
            issue_path("", "repo", 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            issue_path("owner", "  ", 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            issue_path("owner", "repo", 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
