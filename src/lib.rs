mod args;

pub use args::Args;

use github_client::{GithubClient, GithubClientBuilder};
use repo_stats::api::Result;
use repo_stats::{Aggregator, DateWindow, RunResult, StatsConfig};
use std::time::Duration;

const USER_AGENT: &str = concat!("repo-stats/", env!("CARGO_PKG_VERSION"));

pub fn stats_config(args: &Args) -> StatsConfig {
    StatsConfig::new(args.repo.clone())
        .with_branch(args.branch.as_str())
        .with_window(DateWindow::new(args.date_from, args.date_to))
        .with_contributors_cap(args.contributors_cap)
        .with_old_pull_days(args.old_pull_days)
        .with_old_issue_days(args.old_issue_days)
        .with_per_page(args.per_page)
}

pub fn github_client(args: &Args) -> Result<GithubClient> {
    let mut client = GithubClientBuilder::default()
        .try_with_user_agent(USER_AGENT)?
        .try_with_github_url(&args.api_url)?
        .with_timeout(Duration::from_secs(args.timeout));
    if let Some(token) = &args.api_token {
        client = client.try_with_token(token.clone())?;
    }
    client.build()
}

pub fn aggregator(args: &Args) -> Result<Aggregator<GithubClient>> {
    Ok(Aggregator::new(github_client(args)?, stats_config(args)))
}

/// Pretty printed JSON with two space indentation.
pub fn render(result: &RunResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result).map_err(anyhow::Error::from)?)
}
