use chrono::{DateTime, Utc};
use derive_more::Constructor;

/// Optional open interval `(from, to)` used to filter timestamps.
///
/// Both bounds are exclusive: a date equal to either bound is outside the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Constructor)]
pub struct DateWindow {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    pub fn until(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        match (self.from, self.to) {
            (Some(from), None) => date > from,
            (None, Some(to)) => date < to,
            (Some(from), Some(to)) => from < date && date < to,
            (None, None) => true,
        }
    }

    /// Instant item ages are measured from: the lower bound, or now when unbounded.
    pub fn age_reference(&self) -> DateTime<Utc> {
        self.from.unwrap_or_else(Utc::now)
    }
}
