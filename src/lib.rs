//! GitHub Issues client library.
//!
//! A Rust library for the GitHub Issues REST API built from independent
//! capabilities: issue management, label management and assignee
//! management are each defined as a trait, implemented by a small unit that
//! borrows a shared [`Connector`], and combined into one composite service.
//!
//! # Quick Start
//!
//! ```no_run
//! use ghissues::{
//!     GithubClient, IssueWorkflows, IssuesService, ManagesIssueLabels, ManagesIssues,
//!     TriageConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> ghissues::Result<()> {
//!     // Create a service from environment variables
//!     let service = IssuesService::new(GithubClient::from_env()?)?;
//!
//!     // Read an issue
//!     let issue = service.get_issue("octocat", "Hello-World", 1347).await?;
//!     println!("#{} {}", issue.number, issue.title);
//!
//!     // Label it
//!     service.add_label("octocat", "Hello-World", 1347, "needs-triage").await?;
//!
//!     // Run keyword triage
//!     let config = TriageConfig {
//!         auto_priority: true,
//!         ..Default::default()
//!     };
//!     let outcome = service.triage_issue("octocat", "Hello-World", 1347, &config).await?;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Connector`] - sends one [`ApiRequest`] and returns the JSON response;
//!   [`GithubClient`] is the HTTP implementation
//! - [`ManagesIssues`], [`ManagesIssueLabels`], [`ManagesIssueAssignees`] -
//!   capability interfaces
//! - [`capabilities`] - one implementation per interface, each holding only
//!   an `Arc` of the shared connector
//! - [`composition`] - descriptors and a manifest that reject method-name
//!   collisions when a composite is built
//! - [`IssuesService`] - the composite exposing all three interfaces
//! - [`IssueWorkflows`] - triage and bulk updates for any composite
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `GITHUB_TOKEN` (required) - A GitHub token with issues access
//! - `GITHUB_API_URL` (optional) - Base URL (defaults to `https://api.github.com`)

pub mod capabilities;
pub mod cli;
mod client;
pub mod composition;
mod connector;
mod error;
pub mod mcp;
mod models;
mod output;
mod service;
mod traits;
mod workflows;

#[cfg(feature = "test-server")]
pub mod mock_server;

#[cfg(test)]
mod testing;

// Re-export core types
pub use client::GithubClient;
pub use connector::{ApiRequest, Connector};
pub use error::{Error, RemoteError, Result};
pub use output::PrettyPrint;
pub use service::IssuesService;

// Re-export capability interfaces
pub use traits::{ManagesIssueAssignees, ManagesIssueLabels, ManagesIssues};

// Re-export models
pub use models::{
    Issue, IssueListQuery, IssueState, IssueUpdate, Label, NewIssue, StateFilter, User,
};

// Re-export workflows
pub use workflows::{
    priority_label, BulkUpdate, IssueWorkflows, TriageConfig, TriageOutcome, BUG_LABEL,
    URGENT_LABEL,
};
