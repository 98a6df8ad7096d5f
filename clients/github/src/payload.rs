use chrono::{DateTime, Utc};
use repo_stats::api;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CommitEntry {
    pub author: Option<Account>,
    pub commit: Option<CommitDetail>,
}

#[derive(Deserialize, Debug)]
pub struct Account {
    pub login: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CommitDetail {
    pub author: Option<Signature>,
}

#[derive(Deserialize, Debug)]
pub struct Signature {
    pub date: Option<DateTime<Utc>>,
}

impl From<CommitEntry> for api::Commit {
    fn from(entry: CommitEntry) -> Self {
        api::Commit {
            author: entry.author.and_then(|author| author.login),
            date: entry
                .commit
                .and_then(|commit| commit.author)
                .and_then(|author| author.date),
        }
    }
}

/// Pull request or issue, both listings share the fields read here.
#[derive(Deserialize, Debug)]
pub struct Issue {
    pub state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Issue> for api::Item {
    fn from(issue: Issue) -> Self {
        api::Item {
            state: issue.state.and_then(|state| state.parse().ok()),
            created_at: issue.created_at,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RateLimitBody {
    pub rate: RateLimitResource,
}

#[derive(Deserialize, Debug)]
pub struct RateLimitResource {
    pub limit: u32,
    pub remaining: u32,
    pub reset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use repo_stats::api::ItemState;

    #[test]
    fn commit_entry_test() -> anyhow::Result<()> {
        let entry: CommitEntry = serde_json::from_str(
            r#"{
                "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
                "author": { "login": "octocat", "id": 1 },
                "commit": {
                    "author": { "name": "Monalisa Octocat", "date": "2011-04-14T16:00:49Z" },
                    "message": "Fix all the bugs"
                }
            }"#,
        )?;
        let commit = api::Commit::from(entry);
        assert_eq!(commit.author.as_deref(), Some("octocat"));
        assert_eq!(commit.date, Some(Utc.with_ymd_and_hms(2011, 4, 14, 16, 0, 49).unwrap()));
        Ok(())
    }

    #[test]
    fn commit_entry_without_account_test() -> anyhow::Result<()> {
        let entry: CommitEntry = serde_json::from_str(
            r#"{ "author": null, "commit": { "author": { "date": "2011-04-14T16:00:49Z" } } }"#,
        )?;
        let commit = api::Commit::from(entry);
        assert_eq!(commit.author, None);
        assert!(commit.date.is_some());

        let entry: CommitEntry = serde_json::from_str(r#"{ "author": { "login": "octocat" } }"#)?;
        assert_eq!(api::Commit::from(entry).date, None);
        Ok(())
    }

    #[test]
    fn issue_test() -> anyhow::Result<()> {
        let issues: Vec<Issue> = serde_json::from_str(
            r#"[
                { "number": 1347, "state": "open", "created_at": "2011-04-22T13:33:48Z" },
                { "number": 1348, "state": "closed", "created_at": null },
                { "number": 1349, "state": "unknown" }
            ]"#,
        )?;
        let items: Vec<api::Item> = issues.into_iter().map(api::Item::from).collect();
        assert_eq!(items[0].state, Some(ItemState::Open));
        assert!(items[0].created_at.is_some());
        assert_eq!(items[1].state, Some(ItemState::Closed));
        assert_eq!(items[1].created_at, None);
        assert_eq!(items[2].state, None);
        Ok(())
    }

    #[test]
    fn rate_limit_test() -> anyhow::Result<()> {
        let body: RateLimitBody = serde_json::from_str(
            r#"{
                "resources": { "core": { "limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1 } },
                "rate": { "limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1 }
            }"#,
        )?;
        assert_eq!(body.rate.remaining, 4999);
        Ok(())
    }
}
