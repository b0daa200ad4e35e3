//! GitHub Issues CLI binary.
//!
//! A command-line interface for managing GitHub issues, labels and assignees.

use clap::Parser;
use ghissues::cli::{list_query, BulkArgs, Cli, Command, LabelAction, RepoRef, TriageArgs};
use ghissues::{
    GithubClient, Issue, IssueWorkflows, IssuesService, Label, ManagesIssueAssignees,
    ManagesIssueLabels, ManagesIssues, PrettyPrint,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

type Service = IssuesService<GithubClient>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let service = match connect(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set GITHUB_TOKEN environment variable or pass --token");
            return ExitCode::FAILURE;
        }
    };

    match run(&service, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn connect(cli: &Cli) -> ghissues::Result<Service> {
    let token = cli.token.as_deref().ok_or_else(|| {
        ghissues::Error::ConfigMissing("GITHUB_TOKEN not set and --token not given".to_string())
    })?;
    let client = GithubClient::new(token, &cli.api_url)?;
    IssuesService::new(client)
}

async fn run(service: &Service, cli: Cli) -> ghissues::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { repo, number } => {
            let issue = service.get_issue(&repo.owner, &repo.name, number).await?;
            output_single(&issue, json)
        }
        Command::List {
            repo,
            state,
            labels,
            assignee,
            page,
            per_page,
        } => {
            let query = list_query(state, labels, assignee, page, per_page);
            let issues = service.list_issues(&repo.owner, &repo.name, &query).await?;
            output_list(&issues, json, |i| IssueRow::from(i))
        }
        Command::Close { repo, number } => {
            let issue = service.close_issue(&repo.owner, &repo.name, number).await?;
            output_single(&issue, json)
        }
        Command::Reopen { repo, number } => {
            let issue = service.reopen_issue(&repo.owner, &repo.name, number).await?;
            output_single(&issue, json)
        }
        Command::Label { action } => handle_label(service, action, json).await,
        Command::Assign {
            repo,
            number,
            users,
        } => {
            let issue = match users.as_slice() {
                [single] => {
                    service
                        .assign_issue(&repo.owner, &repo.name, number, single)
                        .await?
                }
                _ => {
                    service
                        .add_assignees(&repo.owner, &repo.name, number, &users)
                        .await?
                }
            };
            output_single(&issue, json)
        }
        Command::Unassign {
            repo,
            number,
            users,
        } => {
            let issue = service
                .remove_assignees(&repo.owner, &repo.name, number, &users)
                .await?;
            output_single(&issue, json)
        }
        Command::Triage(args) => handle_triage(service, args, json).await,
        Command::Bulk(args) => handle_bulk(service, args, json).await,
    }
}

async fn handle_label(service: &Service, action: LabelAction, json: bool) -> ghissues::Result<()> {
    let labels = match action {
        LabelAction::Add {
            repo,
            number,
            labels,
        } => {
            service
                .add_labels(&repo.owner, &repo.name, number, &labels)
                .await?
        }
        LabelAction::Replace {
            repo,
            number,
            labels,
        } => {
            service
                .replace_all_labels(&repo.owner, &repo.name, number, &labels)
                .await?
        }
        LabelAction::Remove {
            repo,
            number,
            label,
        } => {
            service
                .remove_label(&repo.owner, &repo.name, number, &label)
                .await?
        }
        LabelAction::Clear { repo, number } => {
            service
                .remove_all_labels(&repo.owner, &repo.name, number)
                .await?;
            Vec::new()
        }
        LabelAction::List { repo, number } => {
            service.list_labels(&repo.owner, &repo.name, number).await?
        }
    };
    output_list(&labels, json, |l| LabelRow::from(l))
}

async fn handle_triage(service: &Service, args: TriageArgs, json: bool) -> ghissues::Result<()> {
    let config = args.to_config()?;
    let RepoRef { owner, name } = &args.repo;
    let outcome = service
        .triage_issue(owner, name, args.number, &config)
        .await?;
    output_single(&outcome, json)
}

async fn handle_bulk(service: &Service, args: BulkArgs, json: bool) -> ghissues::Result<()> {
    let update = args.to_update();
    if update.is_empty() {
        return Err(ghissues::Error::InvalidArgument(
            "bulk needs at least one of --labels, --assignees or --state".to_string(),
        ));
    }

    service
        .bulk_update_issues(&args.repo.owner, &args.repo.name, &args.numbers, &update)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&args.numbers)?);
    } else {
        println!("Updated {} issue(s) in {}", args.numbers.len(), args.repo);
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> ghissues::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> ghissues::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct IssueRow {
    number: u64,
    state: String,
    title: String,
    labels: String,
    assignees: String,
}

impl From<&Issue> for IssueRow {
    fn from(i: &Issue) -> Self {
        Self {
            number: i.number,
            state: i.state.to_string(),
            title: i.title.clone(),
            labels: i.label_names().join(", "),
            assignees: i.assignee_logins().join(", "),
        }
    }
}

#[derive(Tabled)]
struct LabelRow {
    name: String,
    color: String,
    description: String,
}

impl From<&Label> for LabelRow {
    fn from(l: &Label) -> Self {
        Self {
            name: l.name.clone(),
            color: l.color.clone().unwrap_or_default(),
            description: l.description.clone().unwrap_or_default(),
        }
    }
}
