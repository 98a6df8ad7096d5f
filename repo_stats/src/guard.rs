use crate::api::{Client, Commit, CommitQuery, Item, ItemQuery, Page, RepoSlug, Result};
use async_trait::async_trait;
use derive_more::Constructor;
use log::{debug, warn};
use std::future::Future;

/// `Client` middleware checking the remaining quota before every request.
///
/// With the quota exhausted the request is skipped and an empty page returned, so a run
/// undercounts instead of failing. A failed quota check is an error, never a pass.
#[derive(Constructor)]
pub struct RateGuard<CLIENT: Client> {
    client: CLIENT,
}

impl<CLIENT: Client> RateGuard<CLIENT> {
    pub fn inner(&self) -> &CLIENT {
        &self.client
    }

    pub async fn allowed(&self) -> Result<bool> {
        let remaining = self.client.remaining_quota().await?;
        debug!("Remaining quota {}", remaining);
        Ok(remaining > 0)
    }

    async fn gate<T, F>(&self, request: F) -> Result<T>
    where
        T: Default,
        F: Future<Output = Result<T>> + Send,
    {
        if !self.allowed().await? {
            warn!("Limit exceeded, request skipped. Try again later.");
            return Ok(T::default());
        }
        request.await
    }
}

#[async_trait]
impl<CLIENT: Client> Client for RateGuard<CLIENT> {
    async fn remaining_quota(&self) -> Result<u32> {
        self.client.remaining_quota().await
    }

    async fn commits(&self, repo: &RepoSlug, query: &CommitQuery, page: Page) -> Result<Vec<Commit>> {
        self.gate(self.client.commits(repo, query, page)).await
    }

    async fn items(&self, repo: &RepoSlug, query: &ItemQuery, page: Page) -> Result<Vec<Item>> {
        self.gate(self.client.items(repo, query, page)).await
    }
}
