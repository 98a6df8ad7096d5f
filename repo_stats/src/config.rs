use crate::api::RepoSlug;
use crate::window::DateWindow;

pub const DEFAULT_CONTRIBUTORS_CAP: usize = 30;
pub const DEFAULT_OLD_PULL_DAYS: i64 = 30;
pub const DEFAULT_OLD_ISSUE_DAYS: i64 = 14;
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Settings of one statistics run.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub repo: RepoSlug,
    pub branch: String,
    pub window: DateWindow,
    /// Maximal number of distinct contributors reported
    pub contributors_cap: usize,
    /// Open pull requests older than this many days are old
    pub old_pull_days: i64,
    /// Open issues older than this many days are old
    pub old_issue_days: i64,
    pub per_page: u32,
}

impl StatsConfig {
    pub fn new(repo: RepoSlug) -> Self {
        StatsConfig {
            repo,
            branch: "master".to_string(),
            window: DateWindow::default(),
            contributors_cap: DEFAULT_CONTRIBUTORS_CAP,
            old_pull_days: DEFAULT_OLD_PULL_DAYS,
            old_issue_days: DEFAULT_OLD_ISSUE_DAYS,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_branch<STR: Into<String>>(mut self, branch: STR) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_contributors_cap(mut self, cap: usize) -> Self {
        self.contributors_cap = cap;
        self
    }

    pub fn with_old_pull_days(mut self, days: i64) -> Self {
        self.old_pull_days = days;
        self
    }

    pub fn with_old_issue_days(mut self, days: i64) -> Self {
        self.old_issue_days = days;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}
