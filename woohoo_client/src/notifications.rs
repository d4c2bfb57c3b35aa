use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};
use woohoo_protocol::{BannerKind, NavTarget, NotificationBanner};

use crate::config::NotificationConfig;
use crate::events::{EventQueue, WoohooEvent};

/// The canned banner for each category.
pub fn canned_banner(kind: BannerKind, timestamp: DateTime<Utc>) -> NotificationBanner {
    let (title, message, data) = match kind {
        BannerKind::Woohoo => (
            "New Woohoo!",
            "Alexis wants to woohoo with you!",
            json!({ "friendId": "123" }),
        ),
        BannerKind::FriendRequest => (
            "New Friend Request",
            "Jordan wants to be your friend",
            json!({ "userId": "456" }),
        ),
        BannerKind::FriendWoohoo => (
            "Friends Woohoo'd!",
            "Max and Kylee woohoo'd at Starbucks",
            json!({ "woohooId": "789" }),
        ),
    };

    NotificationBanner {
        kind,
        title: title.to_string(),
        message: message.to_string(),
        timestamp,
        data,
    }
}

enum BannerSlot {
    Hidden,
    Visible {
        banner: NotificationBanner,
        generation: u64,
        hide_handle: Option<JoinHandle<()>>,
    },
}

struct SlotState {
    slot: BannerSlot,
    generation: u64,
}

/// The single banner slot. A banner arriving while another is up is dropped,
/// not queued. Whichever of timer, close or tap hides a banner first wins.
pub struct BannerController {
    state: Mutex<SlotState>,
    enabled: AtomicBool,
    banner_duration: Duration,
    events: EventQueue,
}

impl BannerController {
    pub fn new(banner_duration: Duration, events: EventQueue) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SlotState {
                slot: BannerSlot::Hidden,
                generation: 0,
            }),
            enabled: AtomicBool::new(true),
            banner_duration,
            events,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turning notifications off also takes down a visible banner.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.dismiss();
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.lock().slot, BannerSlot::Visible { .. })
    }

    pub fn current(&self) -> Option<NotificationBanner> {
        match &self.lock().slot {
            BannerSlot::Visible { banner, .. } => Some(banner.clone()),
            BannerSlot::Hidden => None,
        }
    }

    /// Put `banner` in the slot and arm its auto-hide timer. Returns false,
    /// dropping the banner, when the slot is taken.
    pub fn show(self: &Arc<Self>, banner: NotificationBanner) -> bool {
        let mut state = self.lock();
        if let BannerSlot::Visible { banner: current, .. } = &state.slot {
            debug!("Dropping {} banner, {} banner is still up", banner.kind, current.kind);
            return false;
        }

        state.generation += 1;
        let generation = state.generation;
        let hide_handle = self.arm_auto_hide(generation);

        info!(kind = %banner.kind, "Showing banner: {}", banner.title);
        state.slot = BannerSlot::Visible {
            banner: banner.clone(),
            generation,
            hide_handle,
        };
        drop(state);

        self.events.push(WoohooEvent::BannerShown(banner));
        true
    }

    /// Close the banner without navigating.
    pub fn dismiss(&self) -> Option<NotificationBanner> {
        let banner = {
            let mut state = self.lock();
            match std::mem::replace(&mut state.slot, BannerSlot::Hidden) {
                BannerSlot::Visible { banner, hide_handle, .. } => {
                    if let Some(handle) = hide_handle {
                        handle.abort();
                    }
                    banner
                }
                BannerSlot::Hidden => return None,
            }
        };

        debug!("Banner dismissed");
        self.events.push(WoohooEvent::BannerHidden);
        Some(banner)
    }

    /// Close the banner and navigate to wherever its category points.
    pub(crate) fn tap(&self) -> Option<NavTarget> {
        let banner = self.dismiss()?;
        let target = banner.kind.nav_target();
        info!("Banner tapped, opening {}", target);
        self.events.push(WoohooEvent::Navigate(target.into()));
        Some(target)
    }

    fn arm_auto_hide(self: &Arc<Self>, generation: u64) -> Option<JoinHandle<()>> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("No runtime to auto-hide banner, it stays until dismissed: {}", e);
                return None;
            }
        };

        let controller = Arc::downgrade(self);
        let duration = self.banner_duration;
        Some(runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(controller) = controller.upgrade() {
                controller.expire(generation);
            }
        }))
    }

    fn expire(&self, generation: u64) {
        {
            let mut state = self.lock();
            let ours = matches!(
                &state.slot,
                BannerSlot::Visible { generation: current, .. } if *current == generation
            );
            if !ours {
                return;
            }
            state.slot = BannerSlot::Hidden;
        }

        debug!("Banner timed out");
        self.events.push(WoohooEvent::BannerHidden);
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// tokio intervals can't have a zero period
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Periodically rolls the dice on surfacing a banner.
pub struct NotificationTicker<R = StdRng> {
    controller: Arc<BannerController>,
    tick_interval: Duration,
    show_probability: f64,
    rng: R,
}

impl NotificationTicker<StdRng> {
    pub fn from_entropy(controller: Arc<BannerController>, config: &NotificationConfig) -> Self {
        Self::new(controller, config, StdRng::from_entropy())
    }
}

impl<R: Rng> NotificationTicker<R> {
    pub fn new(controller: Arc<BannerController>, config: &NotificationConfig, rng: R) -> Self {
        controller.set_enabled(config.enabled);
        if config.tick_interval < MIN_TICK_INTERVAL {
            warn!("Tick interval {:?} is too short, using {:?}", config.tick_interval, MIN_TICK_INTERVAL);
        }
        Self {
            controller,
            tick_interval: config.tick_interval.max(MIN_TICK_INTERVAL),
            show_probability: config.show_probability,
            rng,
        }
    }

    /// One tick. The slot is checked before any randomness is drawn.
    pub fn tick(&mut self) -> Option<NotificationBanner> {
        if !self.controller.is_enabled() || self.controller.is_visible() {
            return None;
        }

        let draw: f64 = self.rng.gen();
        if draw >= self.show_probability {
            return None;
        }

        let kind = BannerKind::ALL[self.rng.gen_range(0..BannerKind::ALL.len())];
        let banner = canned_banner(kind, Utc::now());
        if self.controller.show(banner.clone()) {
            Some(banner)
        } else {
            None
        }
    }

    /// Tick forever, first tick one full interval from now.
    pub async fn run(mut self) {
        let mut interval = interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        loop {
            interval.tick().await;
            self.tick();
        }
    }
}

impl<R: Rng + Send + 'static> NotificationTicker<R> {
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::RngCore;
    use std::sync::atomic::AtomicUsize;

    const BANNER: Duration = Duration::from_millis(4000);

    /// Always lands on the "show" branch, picking the first category.
    fn always_show() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never_show() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    struct CountingRng {
        inner: StepRng,
        draws: Arc<AtomicUsize>,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.draws.fetch_add(1, Ordering::SeqCst);
            self.inner.try_fill_bytes(dest)
        }
    }

    fn setup() -> (Arc<BannerController>, EventQueue) {
        let events = EventQueue::new();
        (BannerController::new(BANNER, events.clone()), events)
    }

    fn config() -> NotificationConfig {
        NotificationConfig {
            banner_duration: BANNER,
            ..Default::default()
        }
    }

    fn banner(kind: BannerKind) -> NotificationBanner {
        canned_banner(kind, Utc::now())
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_hides_itself() {
        let (controller, events) = setup();
        assert!(controller.show(banner(BannerKind::FriendWoohoo)));
        assert!(controller.is_visible());

        advance(3999).await;
        assert!(controller.is_visible());

        advance(2).await;
        assert!(!controller.is_visible());
        let pumped = events.pump();
        assert_eq!(pumped.len(), 2);
        assert!(matches!(pumped[0], WoohooEvent::BannerShown(_)));
        assert_eq!(pumped[1], WoohooEvent::BannerHidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_banner_is_dropped_not_queued() {
        let (controller, _) = setup();
        assert!(controller.show(banner(BannerKind::Woohoo)));
        assert!(!controller.show(banner(BannerKind::FriendRequest)));
        assert_eq!(controller.current().map(|b| b.kind), Some(BannerKind::Woohoo));

        advance(4001).await;
        assert!(controller.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_pending_hide() {
        let (controller, events) = setup();
        controller.show(banner(BannerKind::Woohoo));
        advance(3000).await;

        assert_eq!(controller.dismiss().map(|b| b.kind), Some(BannerKind::Woohoo));
        assert!(controller.dismiss().is_none());
        controller.show(banner(BannerKind::FriendRequest));

        // The first banner's timer would have fired at 4000.
        advance(1500).await;
        assert_eq!(controller.current().map(|b| b.kind), Some(BannerKind::FriendRequest));

        advance(2501).await;
        assert!(!controller.is_visible());

        let hidden = events.pump().into_iter().filter(|e| *e == WoohooEvent::BannerHidden).count();
        assert_eq!(hidden, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_navigates_by_kind() {
        let (controller, events) = setup();
        controller.show(banner(BannerKind::FriendRequest));
        assert_eq!(controller.tap(), Some(NavTarget::FriendsTab));
        assert!(!controller.is_visible());
        assert_eq!(controller.tap(), None);

        let pumped = events.pump();
        assert_eq!(
            &pumped[1..],
            &[WoohooEvent::BannerHidden, WoohooEvent::Navigate(crate::events::Route::FriendsTab)]
        );

        advance(5000).await;
        assert!(events.pump().is_empty());
    }

    #[test]
    fn test_show_without_runtime_stays_until_dismissed() {
        let (controller, _) = setup();
        assert!(controller.show(banner(BannerKind::Woohoo)));
        assert!(controller.is_visible());
        assert!(controller.dismiss().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_while_visible_never_draws_or_shows() {
        let (controller, events) = setup();
        controller.show(banner(BannerKind::FriendWoohoo));
        events.pump();

        let draws = Arc::new(AtomicUsize::new(0));
        let rng = CountingRng {
            inner: always_show(),
            draws: draws.clone(),
        };
        let mut ticker = NotificationTicker::new(controller.clone(), &config(), rng);

        for _ in 0..10 {
            assert!(ticker.tick().is_none());
        }
        assert_eq!(draws.load(Ordering::SeqCst), 0);
        assert_eq!(controller.current().map(|b| b.kind), Some(BannerKind::FriendWoohoo));
        assert!(events.pump().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_shows_on_low_draw() {
        let (controller, _) = setup();
        let mut ticker = NotificationTicker::new(controller.clone(), &config(), always_show());

        let shown = ticker.tick().unwrap();
        assert_eq!(shown.kind, BannerKind::Woohoo);
        assert_eq!(shown.title, "New Woohoo!");
        assert!(controller.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_skips_on_high_draw() {
        let (controller, _) = setup();
        let mut ticker = NotificationTicker::new(controller.clone(), &config(), never_show());
        assert!(ticker.tick().is_none());
        assert!(!controller.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_ticker_is_silent() {
        let (controller, _) = setup();
        let disabled = NotificationConfig {
            enabled: false,
            ..config()
        };
        let mut ticker = NotificationTicker::new(controller.clone(), &disabled, always_show());
        assert!(ticker.tick().is_none());

        controller.set_enabled(true);
        assert!(ticker.tick().is_some());
        controller.set_enabled(false);
        assert!(!controller.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_on_interval() {
        let (controller, _) = setup();
        let handle = NotificationTicker::new(controller.clone(), &config(), always_show()).spawn();

        advance(29_000).await;
        assert!(!controller.is_visible());

        advance(1_001).await;
        assert!(controller.is_visible());

        // Hidden at 34s, shown again on the 60s tick.
        advance(5_000).await;
        assert!(!controller.is_visible());
        advance(25_000).await;
        assert!(controller.is_visible());

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let (controller, _) = setup();
        let zero = NotificationConfig {
            tick_interval: Duration::ZERO,
            ..config()
        };
        let handle = NotificationTicker::new(controller.clone(), &zero, always_show()).spawn();

        advance(2).await;
        assert!(controller.is_visible());
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[test]
    fn test_canned_banners_cover_every_kind() {
        let now = Utc::now();
        for kind in BannerKind::ALL {
            let banner = canned_banner(kind, now);
            assert_eq!(banner.kind, kind);
            assert!(!banner.title.is_empty());
        }
        assert_eq!(canned_banner(BannerKind::FriendRequest, now).data["userId"], "456");
    }
}
