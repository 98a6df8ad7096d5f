use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RepoSlug::new(owner.to_string(), name.to_string()))
            }
            _ => Err(format!("Invalid repository {}. Must be OWNER/NAME", value)),
        }
    }
}

impl Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Listing endpoints sharing the open/closed/old counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
pub enum ItemKind {
    #[strum(serialize = "pulls")]
    PullRequest,
    #[strum(serialize = "issues")]
    Issue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

/// A commit as far as contributor counting cares. Missing fields stay `None`.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Commit {
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// A pull request or an issue.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Item {
    pub state: Option<ItemState>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn next(self) -> Page {
        Page::new(self.number + 1, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct CommitQuery {
    pub branch: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

/// Items are always requested newest-created first.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct ItemQuery {
    pub kind: ItemKind,
    pub base: Option<String>,
}

#[async_trait]
pub trait Client: Send + Sync {
    /// Requests left in the current quota window.
    async fn remaining_quota(&self) -> Result<u32>;

    async fn commits(&self, repo: &RepoSlug, query: &CommitQuery, page: Page) -> Result<Vec<Commit>>;

    async fn items(&self, repo: &RepoSlug, query: &ItemQuery, page: Page) -> Result<Vec<Item>>;
}

#[test]
fn repo_slug_test() {
    let repo: RepoSlug = "rust-lang/rust".parse().unwrap();
    assert_eq!(repo, RepoSlug::new("rust-lang".to_string(), "rust".to_string()));
    assert_eq!(repo.to_string(), "rust-lang/rust");

    assert!("rust".parse::<RepoSlug>().is_err());
    assert!("/rust".parse::<RepoSlug>().is_err());
    assert!("rust-lang/".parse::<RepoSlug>().is_err());
    assert!("a/b/c".parse::<RepoSlug>().is_err());
}

#[test]
fn item_kind_endpoint_test() {
    assert_eq!(ItemKind::PullRequest.as_ref(), "pulls");
    assert_eq!(ItemKind::Issue.to_string(), "issues");
    assert_eq!("closed".parse::<ItemState>(), Ok(ItemState::Closed));
    assert!("merged".parse::<ItemState>().is_err());
}
