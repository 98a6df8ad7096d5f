//! Repository statistics
//!
//! # Overview
//!
//! Queries a code hosting platform for a single repository and aggregates:
//! * top contributors by commit count on a branch,
//! * open, closed and old pull requests,
//! * open, closed and old issues.
//!
//! An optional [`DateWindow`](window::DateWindow) restricts all three to items created (or
//! authored) strictly between its bounds. Pull requests and issues are listed newest first,
//! so paging stops as soon as a page starts with an item outside of the window.
//!
//! Platforms plug in by implementing [`api::Client`]. Every request made by the
//! [`Aggregator`](aggregator::Aggregator) is gated by a quota check; with the quota exhausted
//! requests are skipped and statistics undercount rather than fail.

#[cfg(feature = "aggregator")]
pub mod aggregator;
pub mod api;
pub mod config;
#[cfg(feature = "aggregator")]
pub mod guard;
pub mod tally;
pub mod window;

#[cfg(feature = "aggregator")]
pub use aggregator::Aggregator;
pub use config::StatsConfig;
pub use tally::{ContributorTally, RunResult, StatusTally};
pub use window::DateWindow;
