//! Mock GitHub API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the GitHub
//! Issues API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, so a triage or bulk run can be checked by reading the issues
//! back afterwards.
//!
//! # Example
//!
//! ```ignore
//! use ghissues::mock_server::{Fixtures, MockServer};
//! use ghissues::{GithubClient, IssuesService, ManagesIssues};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = GithubClient::new("test-token", server.url()).unwrap();
//!     let service = IssuesService::new(client).unwrap();
//!
//!     // Server comes with default fixtures
//!     let issue = service.get_issue(Fixtures::OWNER, Fixtures::REPO, 1).await.unwrap();
//!     assert_eq!(issue.title, "URGENT: production crash");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, RecordedRequest, SharedState};
