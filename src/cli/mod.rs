//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ghissues binary.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{BulkUpdate, Error, IssueListQuery, IssueState, Result, StateFilter, TriageConfig};

/// GitHub Issues command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ghissues", about = "GitHub Issues CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of human-readable text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// GitHub token.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL.
    #[arg(
        long,
        global = true,
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a single issue.
    Get {
        /// Repository as owner/name.
        repo: RepoRef,
        /// Issue number.
        number: u64,
    },

    /// List one page of repository issues.
    List {
        /// Repository as owner/name.
        repo: RepoRef,

        /// Filter by state.
        #[arg(long, value_enum)]
        state: Option<ListState>,

        /// Comma-separated label names.
        #[arg(long)]
        labels: Option<String>,

        /// Assignee login, `none` or `*`.
        #[arg(long)]
        assignee: Option<String>,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Close an issue.
    Close {
        repo: RepoRef,
        number: u64,
    },

    /// Reopen an issue.
    Reopen {
        repo: RepoRef,
        number: u64,
    },

    /// Manage labels on an issue.
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },

    /// Assign users to an issue.
    Assign {
        repo: RepoRef,
        number: u64,
        /// Logins to assign.
        #[arg(required = true)]
        users: Vec<String>,
    },

    /// Remove assignees from an issue.
    Unassign {
        repo: RepoRef,
        number: u64,
        /// Logins to remove.
        #[arg(required = true)]
        users: Vec<String>,
    },

    /// Assign and prioritise an issue from its labels and text.
    Triage(TriageArgs),

    /// Apply the same change to several issues, in order.
    Bulk(BulkArgs),
}

/// Label subcommands.
#[derive(Subcommand, Debug)]
pub enum LabelAction {
    /// Add labels, keeping existing ones.
    Add {
        repo: RepoRef,
        number: u64,
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// Replace the full label set (no labels clears it).
    Replace {
        repo: RepoRef,
        number: u64,
        labels: Vec<String>,
    },
    /// Remove one label.
    Remove {
        repo: RepoRef,
        number: u64,
        label: String,
    },
    /// Remove every label.
    Clear {
        repo: RepoRef,
        number: u64,
    },
    /// List labels on the issue.
    List {
        repo: RepoRef,
        number: u64,
    },
}

/// Arguments for `triage`.
#[derive(Args, Debug)]
pub struct TriageArgs {
    pub repo: RepoRef,
    pub number: u64,

    /// JSON file with a triage configuration; flags below are merged into it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Assign from the first mapped label.
    #[arg(long)]
    pub auto_assign: bool,

    /// Label to assignee mapping as `label=login` (repeatable).
    #[arg(long = "map", value_parser = parse_mapping)]
    pub label_assignees: Vec<(String, String)>,

    /// Add a priority label from keywords.
    #[arg(long)]
    pub auto_priority: bool,
}

impl TriageArgs {
    /// Build the effective configuration from the file (if any) and flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn to_config(&self) -> Result<TriageConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::InvalidArgument(format!("cannot read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&raw).map_err(|e| {
                    Error::InvalidArgument(format!("invalid triage config {}: {e}", path.display()))
                })?
            }
            None => TriageConfig::default(),
        };

        config.auto_assign |= self.auto_assign;
        config.auto_priority |= self.auto_priority;
        config
            .label_assignees
            .extend(self.label_assignees.iter().cloned());
        Ok(config)
    }
}

/// Arguments for `bulk`.
#[derive(Args, Debug)]
pub struct BulkArgs {
    pub repo: RepoRef,

    /// Issue numbers, processed in the given order.
    #[arg(required = true)]
    pub numbers: Vec<u64>,

    /// Replace labels with this comma-separated set.
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Add these comma-separated assignees.
    #[arg(long, value_delimiter = ',')]
    pub assignees: Option<Vec<String>>,

    /// Target state (open or closed).
    #[arg(long)]
    pub state: Option<IssueState>,
}

impl BulkArgs {
    pub fn to_update(&self) -> BulkUpdate {
        BulkUpdate {
            labels: self.labels.clone(),
            assignees: self.assignees.clone(),
            state: self.state,
        }
    }
}

/// State filter accepted by `list`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListState {
    Open,
    Closed,
    All,
}

impl From<ListState> for StateFilter {
    fn from(state: ListState) -> Self {
        match state {
            ListState::Open => StateFilter::Open,
            ListState::Closed => StateFilter::Closed,
            ListState::All => StateFilter::All,
        }
    }
}

/// Build a list query from `list` flags.
pub fn list_query(
    state: Option<ListState>,
    labels: Option<String>,
    assignee: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> IssueListQuery {
    IssueListQuery {
        state: state.map(StateFilter::from),
        labels,
        assignee,
        page,
        per_page: per_page.map(|n| n.min(100)),
        ..Default::default()
    }
}

/// A repository reference written as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("expected owner/name, got '{s}'")),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn parse_mapping(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((label, login)) if !label.is_empty() && !login.is_empty() => {
            Ok((label.to_string(), login.to_string()))
        }
        _ => Err(format!("expected label=login, got '{s}'")),
    }
}
