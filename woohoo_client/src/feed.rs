use chrono::{DateTime, Utc};
use woohoo_protocol::WoohooRecord;

use crate::samples::seed_feed;

/// Merge and sort. Returns a new vector on every call; records with equal
/// timestamps keep their input order (`woohoos` before `seed`).
pub fn project_feed(woohoos: &[WoohooRecord], seed: &[WoohooRecord]) -> Vec<WoohooRecord> {
    let mut feed: Vec<WoohooRecord> = woohoos.iter().chain(seed.iter()).cloned().collect();
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed
}

/// Holds the seed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct FeedProjection {
    seed: Vec<WoohooRecord>,
}

impl FeedProjection {
    pub fn new(seed: Vec<WoohooRecord>) -> Self {
        Self { seed }
    }

    /// The built-in sample history, dated relative to `now`.
    pub fn with_sample_seed(now: DateTime<Utc>) -> Self {
        Self::new(seed_feed(now))
    }

    pub fn seed(&self) -> &[WoohooRecord] {
        &self.seed
    }

    pub fn project(&self, woohoos: &[WoohooRecord]) -> Vec<WoohooRecord> {
        project_feed(woohoos, &self.seed)
    }
}

/// Short relative age, e.g. `3h ago` or `2w ago`.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    let hours = minutes / 60;
    let days = hours / 24;
    let weeks = days / 7;

    if weeks > 0 {
        format!("{}w ago", weeks)
    } else if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else {
        format!("{}m ago", minutes)
    }
}
