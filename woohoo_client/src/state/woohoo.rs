use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use woohoo_protocol::{WoohooId, WoohooRecord};

static LAST_WOOHOO_ID: AtomicI64 = AtomicI64::new(0);

/// A fresh woohoo id: wall-clock milliseconds, bumped when needed so that
/// ids keep increasing within the process.
pub fn next_woohoo_id() -> WoohooId {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_WOOHOO_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_WOOHOO_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => last = actual,
        }
    }
}

/// Woohoos created during this session, most recently created first.
#[derive(Debug, Clone, Default)]
pub struct WoohooState {
    pub woohoos: Vec<WoohooRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WoohooState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_woohoos(&mut self, woohoos: Vec<WoohooRecord>) {
        self.woohoos = woohoos;
    }

    /// Goes to the front regardless of the record's own timestamp.
    pub fn create_woohoo(&mut self, woohoo: WoohooRecord) {
        self.woohoos.insert(0, woohoo);
    }

    pub fn delete_woohoo(&mut self, id: &str) {
        self.woohoos.retain(|woohoo| woohoo.id != id);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use woohoo_protocol::UserSummary;

    fn record(id: &str, hours_ago: i64) -> WoohooRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let someone = UserSummary {
            id: "101".to_string(),
            name: "Marshall".to_string(),
            profile_pic: "pic".to_string(),
        };
        WoohooRecord {
            id: id.to_string(),
            user1: someone.clone(),
            user2: someone,
            location: "starbucks".to_string(),
            timestamp: base - Duration::hours(hours_ago),
        }
    }

    fn ids(state: &WoohooState) -> Vec<&str> {
        state.woohoos.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_create_prepends() {
        let mut state = WoohooState::new();
        state.create_woohoo(record("A", 0));
        state.create_woohoo(record("B", 0));
        assert_eq!(ids(&state), vec!["B", "A"]);
    }

    #[test]
    fn test_create_order_ignores_timestamps() {
        let mut state = WoohooState::new();
        state.create_woohoo(record("newest-event", 0));
        state.create_woohoo(record("old-event", 100));
        state.create_woohoo(record("middle-event", 10));
        assert_eq!(ids(&state), vec!["middle-event", "old-event", "newest-event"]);
    }

    #[test]
    fn test_delete() {
        let mut state = WoohooState::new();
        state.create_woohoo(record("A", 0));
        state.create_woohoo(record("B", 0));
        state.delete_woohoo("A");
        state.delete_woohoo("missing");
        assert_eq!(ids(&state), vec!["B"]);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let ids: Vec<i64> = (0..50).map(|_| next_woohoo_id().parse().unwrap()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
