//! GitHub REST v3 implementation of [`repo_stats::api::Client`].

mod builder;
mod payload;

pub use builder::GithubClientBuilder;
pub use builder::DEFAULT_GITHUB_URL;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use repo_stats::api::{Commit, CommitQuery, Error, Item, ItemKind, ItemQuery, Page, RepoSlug, Result};
use reqwest::Client;
use reqwest::Response;
use serde::de::DeserializeOwned;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub struct GithubClient {
    client: Client,
    github_url: String,
}

impl GithubClient {
    fn repo_url(&self, repo: &RepoSlug, endpoint: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.github_url, repo.owner, repo.name, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, url: String, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(anyhow::Error::from)?;
        read_response(response).await
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.json::<T>().await.map_err(anyhow::Error::from)?)
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[async_trait]
impl repo_stats::api::Client for GithubClient {
    async fn remaining_quota(&self) -> Result<u32> {
        let url = format!("{}/rate_limit", self.github_url);
        let body = self.get::<payload::RateLimitBody>(url, &[]).await?;
        debug!(
            "Rate limit {}/{} resets at {}",
            body.rate.remaining, body.rate.limit, body.rate.reset
        );
        Ok(body.rate.remaining)
    }

    async fn commits(&self, repo: &RepoSlug, query: &CommitQuery, page: Page) -> Result<Vec<Commit>> {
        let mut params = vec![("sha", query.branch.clone())];
        if let Some(since) = query.since {
            params.push(("since", format_date(since)));
        }
        if let Some(until) = query.until {
            params.push(("until", format_date(until)));
        }
        params.push(("page", page.number.to_string()));
        params.push(("per_page", page.size.to_string()));

        let commits = self
            .get::<Vec<payload::CommitEntry>>(self.repo_url(repo, "commits"), &params)
            .await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    async fn items(&self, repo: &RepoSlug, query: &ItemQuery, page: Page) -> Result<Vec<Item>> {
        let mut params = vec![("state", "all".to_string())];
        if let (ItemKind::PullRequest, Some(base)) = (query.kind, &query.base) {
            params.push(("base", base.clone()));
        }
        params.push(("sort", "created".to_string()));
        params.push(("direction", "desc".to_string()));
        params.push(("page", page.number.to_string()));
        params.push(("per_page", page.size.to_string()));

        let items = self
            .get::<Vec<payload::Issue>>(self.repo_url(repo, query.kind.as_ref()), &params)
            .await?;
        Ok(items.into_iter().map(Item::from).collect())
    }
}
