//! Triage example: read a few issues, then label and assign them.
//!
//! Run with:
//! ```
//! GITHUB_TOKEN=your-token cargo run --example triage -- octocat/Hello-World 1 2 3
//! ```

use std::collections::HashMap;

use ghissues::{
    GithubClient, IssueListQuery, IssueWorkflows, IssuesService, ManagesIssues, Result,
    TriageConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let repo = args.next().unwrap_or_else(|| "octocat/Hello-World".to_string());
    let Some((owner, name)) = repo.split_once('/') else {
        eprintln!("usage: triage OWNER/REPO [NUMBER...]");
        return Ok(());
    };
    let numbers: Vec<u64> = args.filter_map(|a| a.parse().ok()).collect();

    // Create the composite service from environment variables
    println!("Creating GitHub client...");
    let client = GithubClient::from_env()?;
    println!("Connected to: {}", client.base_url());
    let service = IssuesService::new(client)?;
    println!("Capabilities: {:?}", service.manifest().capabilities());

    // Without explicit numbers, triage the first page of open issues
    let numbers = if numbers.is_empty() {
        println!("\n--- Listing open issues ---");
        let query = IssueListQuery {
            per_page: Some(10),
            ..Default::default()
        };
        let issues = service.list_issues(owner, name, &query).await?;
        for issue in &issues {
            println!("  #{} {} [{}]", issue.number, issue.title, issue.label_names().join(", "));
        }
        issues
            .iter()
            .filter(|i| !i.is_pull_request())
            .map(|i| i.number)
            .collect()
    } else {
        numbers
    };

    let config = TriageConfig {
        auto_assign: true,
        label_assignees: HashMap::from([
            ("bug".to_string(), owner.to_string()),
            ("documentation".to_string(), owner.to_string()),
        ]),
        auto_priority: true,
    };

    println!("\n--- Triage ---");
    for number in numbers {
        let outcome = service.triage_issue(owner, name, number, &config).await?;
        println!(
            "  #{number}: assigned={} label={}",
            outcome.assigned.as_deref().unwrap_or("-"),
            outcome.label_added.as_deref().unwrap_or("-"),
        );
    }

    println!("\nDone!");
    Ok(())
}
