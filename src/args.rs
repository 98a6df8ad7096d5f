use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Parser;
use github_client::DEFAULT_GITHUB_URL;
use repo_stats::api::RepoSlug;
use secrecy::SecretString;
use std::{
    fmt::Display,
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub repository, OWNER/NAME
    pub repo: RepoSlug,

    /// Analyze from date - YYYY-MM-DD
    #[clap(short = 'f', long = "date_from", alias = "df", parse(try_from_str = valid_date))]
    pub date_from: Option<DateTime<Utc>>,

    /// Analyze to date - YYYY-MM-DD
    #[clap(short = 't', long = "date_to", alias = "dt", parse(try_from_str = valid_date))]
    pub date_to: Option<DateTime<Utc>>,

    /// Branch name to analyze
    #[clap(short, long, env = "REPO_STATS_BRANCH", default_value = "master")]
    pub branch: String,

    /// API OAuth access token
    #[clap(long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = DEFAULT_GITHUB_URL)]
    pub api_url: String,

    /// API request timeout in seconds
    #[clap(long, env = "REPO_STATS_TIMEOUT", default_value_t = 30, parse(try_from_str = timeout_in_range))]
    pub timeout: u64,

    /// Maximal number of reported contributors
    #[clap(long, env = "REPO_STATS_CONTRIBUTORS_CAP", default_value_t = 30)]
    pub contributors_cap: usize,

    /// Days after which an open pull request is old
    #[clap(long, env = "REPO_STATS_OLD_PULL_DAYS", default_value_t = 30, parse(try_from_str = days_in_range))]
    pub old_pull_days: i64,

    /// Days after which an open issue is old
    #[clap(long, env = "REPO_STATS_OLD_ISSUE_DAYS", default_value_t = 14, parse(try_from_str = days_in_range))]
    pub old_issue_days: i64,

    /// Page size of API listings
    #[clap(long, env = "REPO_STATS_PER_PAGE", default_value_t = 100, parse(try_from_str = per_page_in_range))]
    pub per_page: u32,
}

/// Parses `YYYY-MM-DD` to the start of that day, UTC.
fn valid_date(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| Utc.from_utc_datetime(&date))
        .ok_or_else(|| format!("Invalid date format for {}. Must be YYYY-MM-DD", value))
}

fn timeout_in_range(value: &str) -> Result<u64, String> {
    number_in_range(value, 1, 3600, "timeout")
}

fn days_in_range(value: &str) -> Result<i64, String> {
    number_in_range(value, 0, i64::from(u32::MAX), "days")
}

fn per_page_in_range(value: &str) -> Result<u32, String> {
    number_in_range(value, 1, 100, "per_page")
}

fn number_in_range<T>(value: &str, min: T, max: T, name: &str) -> Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} ..= {}.", name, min, max));
        }
        Ok(value)
    })
}
