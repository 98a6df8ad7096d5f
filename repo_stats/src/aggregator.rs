use crate::api::{Client, Commit, CommitQuery, Error, Item, ItemKind, ItemQuery, Page, Result};
use crate::config::StatsConfig;
use crate::guard::RateGuard;
use crate::tally::{ContributorTally, RunResult, StatusTally};
use crate::window::DateWindow;
use futures::{pin_mut, stream, Stream, TryStreamExt};
use log::{debug, info};
use std::future::Future;

pub const FIRST_PAGE_NUMBER: u32 = 1;

/// Collects contributor, pull request and issue statistics of one repository.
///
/// Every request goes through a [`RateGuard`]. Passes run one after another and fold
/// their pages into a shared [`RunResult`]; what was folded before a failure stays there.
pub struct Aggregator<CLIENT: Client> {
    client: RateGuard<CLIENT>,
    config: StatsConfig,
    result: RunResult,
}

impl<CLIENT: Client> Aggregator<CLIENT> {
    pub fn new(client: CLIENT, config: StatsConfig) -> Self {
        Aggregator {
            client: RateGuard::new(client),
            config,
            result: RunResult::default(),
        }
    }

    /// Statistics collected so far, including those of a failed run.
    pub fn result(&self) -> &RunResult {
        &self.result
    }

    pub async fn stats(&mut self) -> Result<RunResult> {
        self.contributors().await?;
        self.status(ItemKind::PullRequest).await?;
        self.status(ItemKind::Issue).await?;
        Ok(self.result.clone())
    }

    pub async fn contributors(&mut self) -> Result<&ContributorTally> {
        let cap = self.config.contributors_cap;
        let mut tally = None;
        let outcome = self.fold_commits(&mut tally).await;
        self.result.contributors = tally;
        outcome?;
        let tally = self
            .result
            .contributors
            .get_or_insert_with(|| ContributorTally::new(cap));
        info!("Found {} contributors of {}", tally.len(), self.config.repo);
        Ok(tally)
    }

    pub async fn status(&mut self, kind: ItemKind) -> Result<&StatusTally> {
        let mut tally = None;
        let outcome = self.fold_items(kind, &mut tally).await;
        *self.result.status_mut(kind) = tally;
        outcome?;
        let tally = self.result.status_mut(kind).get_or_insert_with(StatusTally::default);
        info!("Counted {}: {:?}", kind, tally);
        Ok(tally)
    }

    async fn fold_commits(&self, tally: &mut Option<ContributorTally>) -> Result<()> {
        let window = self.config.window;
        let per_page = self.config.per_page;
        let query = CommitQuery::new(self.config.branch.clone(), window.since(), window.until());
        let commit_pages = pages(Page::new(FIRST_PAGE_NUMBER, per_page), |page| {
            self.client.commits(&self.config.repo, &query, page)
        });
        pin_mut!(commit_pages);

        while let Some(commits) = commit_pages.try_next().await? {
            if commits.is_empty() {
                break;
            }
            let tally = tally.get_or_insert_with(|| ContributorTally::new(self.config.contributors_cap));
            let counted = count_commits(tally, &commits, &window);
            debug!("Counted {} of {} commits", counted, commits.len());
            if (commits.len() as u32) < per_page {
                break;
            }
        }
        Ok(())
    }

    async fn fold_items(&self, kind: ItemKind, tally: &mut Option<StatusTally>) -> Result<()> {
        let window = self.config.window;
        let reference = window.age_reference();
        let old_after_days = match kind {
            ItemKind::PullRequest => self.config.old_pull_days,
            ItemKind::Issue => self.config.old_issue_days,
        };
        let base = match kind {
            ItemKind::PullRequest => Some(self.config.branch.clone()),
            ItemKind::Issue => None,
        };
        let query = ItemQuery::new(kind, base);
        let item_pages = pages(Page::new(FIRST_PAGE_NUMBER, self.config.per_page), |page| {
            self.client.items(&self.config.repo, &query, page)
        });
        pin_mut!(item_pages);

        while let Some(items) = item_pages.try_next().await? {
            if items.is_empty() {
                break;
            }
            let tally = tally.get_or_insert_with(StatusTally::default);
            for item in &items {
                tally.record(item, &window, reference, old_after_days);
            }
            if !newest_in_window(&items, &window) {
                debug!("Newest of {} {} is out of range, no more pages", items.len(), kind);
                break;
            }
        }
        Ok(())
    }
}

/// Lazy sequence of pages starting at `first`. A page is requested only when polled.
fn pages<T, F, FUT>(first: Page, fetch: F) -> impl Stream<Item = Result<Vec<T>>>
where
    F: Fn(Page) -> FUT,
    FUT: Future<Output = Result<Vec<T>>>,
{
    stream::try_unfold(first, move |page| {
        let request = fetch(page);
        async move {
            let records = request.await?;
            debug!("Fetched page {} with {} records", page.number, records.len());
            Ok::<_, Error>(Some((records, page.next())))
        }
    })
}

fn count_commits(tally: &mut ContributorTally, commits: &[Commit], window: &DateWindow) -> usize {
    commits
        .iter()
        .filter(|commit| tally.record_commit(commit, window))
        .count()
}

/// Pages are sorted newest first, so once the newest item is out of range the rest are too.
fn newest_in_window(items: &[Item], window: &DateWindow) -> bool {
    items
        .first()
        .and_then(|item| item.created_at)
        .map_or(false, |created_at| window.contains(created_at))
}
