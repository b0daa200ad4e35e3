//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Issue, TriageOutcome, User};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Issue {
    fn pretty_print(&self) -> String {
        let header = format!("Issue #{}: {}", self.number, self.title);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider, format!("State:          {}", self.state)];

        if let Some(ref reason) = self.state_reason {
            lines.push(format!("Reason:         {}", reason));
        }

        if let Some(ref user) = self.user {
            lines.push(format!("Author:         {}", user.login));
        }

        let labels = self.label_names();
        if !labels.is_empty() {
            lines.push(format!("Labels:         {}", labels.join(", ")));
        }

        let assignees = self.assignee_logins();
        if !assignees.is_empty() {
            lines.push(format!("Assignees:      {}", assignees.join(", ")));
        }

        lines.push(format!("Comments:       {}", self.comments));

        if self.locked {
            lines.push("Locked:         yes".to_string());
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref closed) = self.closed_at {
            lines.push(format!("Closed:         {}", closed.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref url) = self.html_url {
            lines.push(format!("URL:            {}", url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        match self.account_type.as_deref() {
            Some(kind) if kind != "User" => format!("{} ({})", self.login, kind),
            _ => self.login.clone(),
        }
    }
}

impl PrettyPrint for TriageOutcome {
    fn pretty_print(&self) -> String {
        if self.is_unchanged() {
            return "No triage changes".to_string();
        }

        let mut lines = Vec::new();
        if let Some(ref login) = self.assigned {
            lines.push(format!("Assigned:       {}", login));
        }
        if let Some(ref label) = self.label_added {
            lines.push(format!("Label added:    {}", label));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_pretty_print_format() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": 42,
            "title": "Crash on start",
            "state": "open",
            "labels": [{"name": "bug"}],
            "assignees": [{"login": "alice", "id": 1}]
        }))
        .unwrap();

        let output = issue.pretty_print();
        assert!(output.starts_with("Issue #42: Crash on start"));
        assert!(output.contains("State:          open"));
        assert!(output.contains("Labels:         bug"));
        assert!(output.contains("Assignees:      alice"));
    }

    #[test]
    fn test_triage_outcome_pretty_print() {
        assert_eq!(TriageOutcome::default().pretty_print(), "No triage changes");

        let outcome = TriageOutcome {
            assigned: Some("alice".to_string()),
            label_added: None,
        };
        assert_eq!(outcome.pretty_print(), "Assigned:       alice");
    }
}
