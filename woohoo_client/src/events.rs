use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use tracing::error;
use woohoo_protocol::{NavTarget, NotificationBanner, WoohooRecord};

/// Screens the client can ask the presentation layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Phone,
    Code,
    Name,
    Username,
    ProfilePic,
    AddFriends,
    FriendsInfo,
    Loading,
    FeedTab,
    WoohooTab,
    FriendsTab,
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::WoohooTab => Route::WoohooTab,
            NavTarget::FriendsTab => Route::FriendsTab,
            NavTarget::FeedTab => Route::FeedTab,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WoohooEvent {
    BannerShown(NotificationBanner),
    BannerHidden,
    Navigate(Route),
    WoohooCreated(WoohooRecord),
    ScanFailed(String),
    LoggedOut,
}

/// Events we've produced but the presentation layer hasn't processed yet.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Arc<RwLock<VecDeque<WoohooEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: WoohooEvent) {
        if let Ok(mut queue) = self.pending.write() {
            queue.push_back(event);
        } else {
            error!("Event queue is poisoned, dropping {:?}", event);
        }
    }

    /// Take everything queued so far, oldest first.
    pub fn pump(&self) -> Vec<WoohooEvent> {
        let mut events = Vec::new();
        if let Ok(mut queue) = self.pending.write() {
            while let Some(event) = queue.pop_front() {
                events.push(event);
            }
        }
        events
    }

    pub fn len(&self) -> usize {
        self.pending.read().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_drains_in_order() {
        let queue = EventQueue::new();
        let producer = queue.clone();
        producer.push(WoohooEvent::Navigate(Route::Loading));
        producer.push(WoohooEvent::BannerHidden);

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.pump(),
            vec![WoohooEvent::Navigate(Route::Loading), WoohooEvent::BannerHidden]
        );
        assert!(queue.is_empty());
        assert!(queue.pump().is_empty());
    }

    #[test]
    fn test_nav_target_routes() {
        assert_eq!(Route::from(NavTarget::FeedTab), Route::FeedTab);
        assert_eq!(Route::from(NavTarget::FriendsTab), Route::FriendsTab);
        assert_eq!(Route::from(NavTarget::WoohooTab), Route::WoohooTab);
    }
}
