//! MCP (Model Context Protocol) server and tool types.
//!
//! This module exposes the issues service over MCP, allowing AI assistants
//! to read, list, update and triage GitHub issues.
//!
//! # Example
//!
//! ```no_run
//! use ghissues::mcp::GithubIssuesServer;
//!
//! # fn main() -> ghissues::Result<()> {
//! let server = GithubIssuesServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::GithubIssuesServer;
