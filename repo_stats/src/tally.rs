use crate::api::{Commit, Item, ItemKind, ItemState};
use crate::window::DateWindow;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Commit counts per contributor login.
///
/// Holds at most `cap` distinct logins. Once full, unknown logins are dropped while
/// known ones keep counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorTally {
    counts: HashMap<String, u32>,
    cap: usize,
}

impl ContributorTally {
    pub fn new(cap: usize) -> Self {
        ContributorTally {
            counts: HashMap::new(),
            cap,
        }
    }

    /// Returns `false` when the login was dropped because the tally is full.
    pub fn record(&mut self, login: &str) -> bool {
        if let Some(count) = self.counts.get_mut(login) {
            *count += 1;
            return true;
        }
        if self.counts.len() >= self.cap {
            return false;
        }
        self.counts.insert(login.to_string(), 1);
        true
    }

    /// Counts `commit` if it has an author and an authorship date inside `window`.
    pub fn record_commit(&mut self, commit: &Commit, window: &DateWindow) -> bool {
        match (&commit.author, commit.date) {
            (Some(author), Some(date)) if window.contains(date) => self.record(author),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Contributors by commit count descending, ties by login ascending.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(login, count)| (login.as_str(), *count))
            .collect();
        ranked.sort_by(|(a_login, a_count), (b_login, b_count)| b_count.cmp(a_count).then(a_login.cmp(b_login)));
        ranked
    }
}

impl Serialize for ContributorTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ranked = self.ranked();
        let mut map = serializer.serialize_map(Some(ranked.len()))?;
        for (login, count) in ranked {
            map.serialize_entry(login, &count)?;
        }
        map.end()
    }
}

/// Open, closed and old counters of pull requests or issues. `old` counts open items only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    #[serde(skip_serializing_if = "is_zero")]
    pub open: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub old: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub closed: u32,
}

fn is_zero(count: &u32) -> bool {
    *count == 0
}

impl StatusTally {
    /// Counts `item` if it was created inside `window`.
    ///
    /// An open item is also old when more than `old_after_days` whole days separate its
    /// creation from `reference`.
    pub fn record(
        &mut self,
        item: &Item,
        window: &DateWindow,
        reference: DateTime<Utc>,
        old_after_days: i64,
    ) -> bool {
        let created_at = match item.created_at {
            Some(created_at) if window.contains(created_at) => created_at,
            _ => return false,
        };
        match item.state {
            Some(ItemState::Open) => {
                self.open += 1;
                if (reference - created_at).num_days() > old_after_days {
                    self.old += 1;
                }
                true
            }
            Some(ItemState::Closed) => {
                self.closed += 1;
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StatusTally::default()
    }
}

/// Statistics of a single run. Passes that never produced data are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<ContributorTally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prs: Option<StatusTally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<StatusTally>,
}

impl RunResult {
    pub fn status_mut(&mut self, kind: ItemKind) -> &mut Option<StatusTally> {
        match kind {
            ItemKind::PullRequest => &mut self.prs,
            ItemKind::Issue => &mut self.issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn commit(author: Option<&str>, date: Option<DateTime<Utc>>) -> Commit {
        Commit::new(author.map(str::to_string), date)
    }

    fn item(state: ItemState, days_ago: i64) -> Item {
        Item::new(Some(state), Some(Utc::now() - Duration::days(days_ago)))
    }

    fn items() -> Vec<Item> {
        [ItemState::Open, ItemState::Closed]
            .into_iter()
            .flat_map(|state| [0, 32, 15].map(|days| item(state, days)))
            .collect()
    }

    fn fold(items: &[Item], window: DateWindow, old_after_days: i64) -> StatusTally {
        let mut tally = StatusTally::default();
        let reference = window.age_reference();
        for item in items {
            tally.record(item, &window, reference, old_after_days);
        }
        tally
    }

    #[test]
    fn commits_without_author_or_date_are_skipped() {
        let now = Utc::now();
        let commits = vec![
            commit(Some("a"), Some(now)),
            commit(None, Some(now)),
            commit(Some("a"), None),
            commit(Some("b"), Some(now)),
            commit(None, None),
        ];
        let mut tally = ContributorTally::new(30);
        let counted = commits
            .iter()
            .filter(|commit| tally.record_commit(commit, &DateWindow::default()))
            .count();
        assert_eq!(counted, 2);
        assert_eq!(tally.ranked(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn cap_drops_new_logins_only() {
        let mut tally = ContributorTally::new(2);
        assert!(tally.record("a"));
        assert!(tally.record("b"));
        assert!(!tally.record("c"));
        assert!(tally.record("a"));
        assert!(tally.record("b"));
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.ranked(), vec![("a", 2), ("b", 2)]);
    }

    #[test]
    fn ranked_breaks_ties_by_login() {
        let mut tally = ContributorTally::new(30);
        for login in ["c", "b", "a", "b", "d", "d"] {
            tally.record(login);
        }
        assert_eq!(tally.ranked(), vec![("b", 2), ("d", 2), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn pulls_status() {
        let tally = fold(&items(), DateWindow::default(), 30);
        assert_eq!(tally, StatusTally { open: 3, old: 1, closed: 3 });
    }

    #[test]
    fn issues_status() {
        let tally = fold(&items(), DateWindow::default(), 14);
        assert_eq!(tally, StatusTally { open: 3, old: 2, closed: 3 });
    }

    #[test]
    fn status_date_from() {
        let window = DateWindow::new(Some(Utc::now() - Duration::days(20)), None);
        let tally = fold(&items(), window, 30);
        assert_eq!(tally, StatusTally { open: 2, old: 0, closed: 2 });
    }

    #[test]
    fn status_date_to() {
        let window = DateWindow::new(None, Some(Utc::now() - Duration::days(20)));
        let tally = fold(&items(), window, 30);
        assert_eq!(tally, StatusTally { open: 1, old: 1, closed: 1 });
    }

    #[test]
    fn status_empty_window() {
        let now = Utc::now();
        let window = DateWindow::new(Some(now - Duration::days(160)), Some(now - Duration::days(120)));
        assert!(fold(&items(), window, 30).is_empty());
    }

    #[test]
    fn items_without_created_at_or_state_are_skipped() {
        let mut tally = StatusTally::default();
        let window = DateWindow::default();
        assert!(!tally.record(&Item::new(Some(ItemState::Open), None), &window, Utc::now(), 30));
        assert!(!tally.record(&Item::new(None, Some(Utc::now())), &window, Utc::now(), 30));
        assert!(tally.is_empty());
    }
}
