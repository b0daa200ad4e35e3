//! Capability interfaces.
//!
//! Each trait is a closed contract for one group of issue operations. The
//! capability types in [`crate::capabilities`] implement them against a
//! connector, and composite services expose them by delegation.

mod assignees;
mod issues;
mod labels;

pub use assignees::ManagesIssueAssignees;
pub use issues::ManagesIssues;
pub use labels::ManagesIssueLabels;
