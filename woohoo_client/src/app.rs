use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};
use woohoo_protocol::{FriendRecord, NotificationBanner, User, WoohooDraft, WoohooRecord, PLACEHOLDER_PROFILE_PIC};

use crate::config::{ClientConfig, NotificationConfig};
use crate::error::ClientError;
use crate::events::{EventQueue, Route, WoohooEvent};
use crate::feed::FeedProjection;
use crate::notifications::{BannerController, NotificationTicker};
use crate::proximity::{MockLocator, MockNfc, Placemark};
use crate::samples::{sample_friends, tap_partner};
use crate::services::{Backend, MockBackend, ServiceError};
use crate::state::{AuthState, FriendPicker, FriendsState, WoohooState};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::validation::{validate_code, validate_first_name, validate_phone_number, validate_username};
use crate::i18n;

/// Toggles on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub notifications: bool,
    pub location_sharing: bool,
    pub woohoo_sounds: bool,
}

/// Every store, the backend and the banner slot behind one handle.
pub struct WoohooApp {
    config: ClientConfig,
    auth: AuthState,
    friends: FriendsState,
    woohoos: WoohooState,
    feed: FeedProjection,
    picker: FriendPicker,
    backend: Arc<dyn Backend>,
    nfc: MockNfc<StdRng>,
    locator: MockLocator,
    settings: Settings,
    banners: Arc<BannerController>,
    events: EventQueue,
    route: Route,
    resend_available_at: Option<Instant>,
}

impl WoohooApp {
    /// Open storage as configured and wire up the mock backend. A damaged
    /// storage file is logged and treated as empty.
    pub fn new(config: ClientConfig) -> Self {
        let storage: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => {
                info!("Using storage file {}", path.display());
                Arc::new(FileStore::open_or_empty(path))
            }
            None => {
                debug!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };
        let backend = Arc::new(MockBackend::new(config.delays.clone()));
        Self::with_parts(config, storage, backend)
    }

    pub fn with_parts(config: ClientConfig, storage: Arc<dyn KeyValueStore>, backend: Arc<dyn Backend>) -> Self {
        let auth = AuthState::restore(storage);
        let route = if auth.is_authenticated() { Route::FeedTab } else { Route::Phone };

        let events = EventQueue::new();
        let banners = BannerController::new(config.notifications.banner_duration, events.clone());
        banners.set_enabled(config.notifications.enabled);

        let nfc = MockNfc::from_entropy(config.delays.nfc_support, config.delays.nfc_scan, config.scan_success_rate);
        let locator = MockLocator::new(
            config.location_sharing,
            Placemark {
                name: Some("Pine Crest School".to_string()),
                ..Default::default()
            },
        );
        let settings = Settings {
            notifications: config.notifications.enabled,
            location_sharing: config.location_sharing,
            woohoo_sounds: true,
        };

        Self {
            auth,
            friends: FriendsState::new(),
            woohoos: WoohooState::new(),
            feed: FeedProjection::with_sample_seed(Utc::now()),
            picker: FriendPicker::new(sample_friends()),
            backend,
            nfc,
            locator,
            settings,
            banners,
            events,
            route,
            resend_available_at: None,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn friends(&self) -> &FriendsState {
        &self.friends
    }

    pub fn woohoos(&self) -> &WoohooState {
        &self.woohoos
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn picker(&self) -> &FriendPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut FriendPicker {
        &mut self.picker
    }

    pub fn banners(&self) -> &BannerController {
        &self.banners
    }

    pub fn show_banner(&self, banner: NotificationBanner) -> bool {
        self.banners.show(banner)
    }

    /// Events produced since the last call, oldest first.
    pub fn pump(&self) -> Vec<WoohooEvent> {
        self.events.pump()
    }

    fn navigate(&mut self, route: Route) {
        debug!("Navigating to {:?}", route);
        self.route = route;
        self.events.push(WoohooEvent::Navigate(route));
    }

    pub async fn submit_phone(&mut self, phone_number: &str) -> Result<(), ClientError> {
        let language = self.config.language;
        validate_phone_number(phone_number, language)?;

        self.auth.set_loading(true);
        let sent = self.backend.send_verification_code(phone_number).await;
        self.auth.set_loading(false);

        if let Err(e) = sent {
            error!("Error sending verification code: {}", e);
            let err = i18n::request_failed(language);
            self.auth.set_error(Some(err.0.clone()));
            return Err(err);
        }

        self.auth.set_error(None);
        self.auth.set_phone_number(phone_number);
        self.resend_available_at = Some(Instant::now() + self.config.resend_cooldown);
        self.navigate(Route::Code);
        Ok(())
    }

    pub async fn submit_code(&mut self, code: &str) -> Result<(), ClientError> {
        let language = self.config.language;
        validate_code(code, language)?;

        let phone_number = self.auth.phone_number().unwrap_or_default().to_string();
        self.auth.set_loading(true);
        let verified = self.backend.verify_code(&phone_number, code).await;
        self.auth.set_loading(false);

        match verified {
            Ok(session) => {
                debug!("Verified {} as {}", session.phone_number, session.user_id);
                self.auth.set_error(None);
                self.auth.verify_code(code);
                self.navigate(Route::Name);
                Ok(())
            }
            Err(e) => {
                warn!("Error verifying code: {}", e);
                let err = match e {
                    ServiceError::InvalidCode => i18n::invalid_code(language),
                    _ => i18n::request_failed(language),
                };
                self.auth.set_error(Some(err.0.clone()));
                Err(err)
            }
        }
    }

    /// Time left before `resend_code` is allowed again.
    pub fn resend_wait(&self) -> Duration {
        self.resend_available_at
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    pub async fn resend_code(&mut self) -> Result<(), ClientError> {
        let language = self.config.language;
        let Some(phone_number) = self.auth.phone_number().map(str::to_string) else {
            return Err(i18n::phone_number_required(language));
        };

        let wait = self.resend_wait();
        if !wait.is_zero() {
            return Err(i18n::resend_too_soon(language, wait.as_secs_f64().ceil() as u64));
        }

        self.auth.set_loading(true);
        let sent = self.backend.send_verification_code(&phone_number).await;
        self.auth.set_loading(false);

        match sent {
            Ok(_) => {
                self.resend_available_at = Some(Instant::now() + self.config.resend_cooldown);
                Ok(())
            }
            Err(e) => {
                error!("Error resending verification code: {}", e);
                Err(i18n::request_failed(language))
            }
        }
    }

    pub fn submit_name(&mut self, name: &str) -> Result<(), ClientError> {
        validate_first_name(name, self.config.language)?;
        self.auth.set_user_name(name.trim());
        self.navigate(Route::Username);
        Ok(())
    }

    pub fn submit_username(&mut self, username: &str) -> Result<(), ClientError> {
        validate_username(username, self.config.language)?;
        self.auth.set_username(username);
        self.navigate(Route::ProfilePic);
        Ok(())
    }

    /// `None` skips the step with the placeholder picture.
    pub fn submit_profile_pic(&mut self, uri: Option<&str>) {
        self.auth.set_profile_pic(uri.unwrap_or(PLACEHOLDER_PROFILE_PIC));
        self.navigate(Route::AddFriends);
    }

    /// Add everyone selected in the picker. Returns how many were new.
    pub async fn submit_friends(&mut self) -> usize {
        for id in self.picker.selected_ids() {
            if let Err(e) = self.backend.add_friend(&id).await {
                warn!("Error adding friend {}: {}", id, e);
            }
        }
        let added = self.picker.commit(&mut self.friends);
        info!("Added {} friends", added);
        self.navigate(Route::FriendsInfo);
        added
    }

    pub fn finish_onboarding(&mut self) {
        self.auth.set_authenticated(true);
        self.navigate(Route::FeedTab);
    }

    pub async fn logout(&mut self) {
        if let Err(e) = self.backend.logout_user().await {
            warn!("Error logging out: {}", e);
        }
        self.banners.dismiss();
        self.auth.logout();
        self.events.push(WoohooEvent::LoggedOut);
        self.navigate(Route::Phone);
    }

    pub async fn load_friends(&mut self) -> Result<(), ClientError> {
        self.friends.set_loading(true);
        let friends = self.backend.get_friends().await;
        let requests = self.backend.get_friend_requests().await;
        self.friends.set_loading(false);

        match (friends, requests) {
            (Ok(friends), Ok(requests)) => {
                self.friends.set_error(None);
                self.friends.set_friends(friends);
                self.friends.set_friend_requests(requests);
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Error loading friends: {}", e);
                let err = i18n::request_failed(self.config.language);
                self.friends.set_error(Some(err.0.clone()));
                Err(err)
            }
        }
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<FriendRecord>, ClientError> {
        Ok(self.backend.search_users(query).await?)
    }

    pub async fn remove_friend(&mut self, id: &str) -> Result<(), ClientError> {
        self.backend.remove_friend(id).await?;
        self.friends.remove_friend(id);
        Ok(())
    }

    /// Settle a pending request. Accepting also adds the sender as a friend.
    pub async fn respond_to_friend_request(&mut self, request_id: &str, accept: bool) -> Result<(), ClientError> {
        self.friends.set_loading(true);
        let responded = self.backend.respond_to_friend_request(request_id, accept).await;
        self.friends.set_loading(false);

        if let Err(e) = responded {
            error!("Error responding to friend request {}: {}", request_id, e);
            let err = i18n::request_failed(self.config.language);
            self.friends.set_error(Some(err.0.clone()));
            return Err(err);
        }

        let friend = self.friends.friend_request(request_id).map(|request| request.to_friend());
        self.friends.remove_friend_request(request_id);
        if accept {
            if let Some(friend) = friend {
                self.friends.add_friend(friend);
            }
        }
        Ok(())
    }

    /// Simulate two phones touching and record the meetup.
    pub async fn tap_phones(&mut self) -> Result<WoohooRecord, ClientError> {
        let language = self.config.language;

        if !self.nfc.is_supported().await {
            let err = i18n::nfc_not_supported(language);
            self.events.push(WoohooEvent::ScanFailed(err.0.clone()));
            return Err(err);
        }

        self.woohoos.set_loading(true);
        if let Err(e) = self.nfc.scan().await {
            warn!("Error scanning: {}", e);
            self.woohoos.set_loading(false);
            let err = i18n::scan_failed(language);
            self.woohoos.set_error(Some(err.0.clone()));
            self.events.push(WoohooEvent::ScanFailed(err.0.clone()));
            return Err(err);
        }

        sleep(self.config.delays.scan_to_loading).await;
        self.navigate(Route::Loading);
        sleep(self.config.delays.loading_to_record).await;

        let user1 = self.auth.user().map(User::summary).unwrap_or_else(|| User::default().summary());
        let draft = WoohooDraft {
            user1,
            user2: tap_partner().summary(),
            location: self.locator.current_location_name().await,
        };

        let created = self.backend.create_woohoo(draft).await;
        self.woohoos.set_loading(false);
        let record = match created {
            Ok(record) => record,
            Err(e) => {
                error!("Error creating woohoo: {}", e);
                let err = i18n::request_failed(language);
                self.woohoos.set_error(Some(err.0.clone()));
                return Err(err);
            }
        };

        info!("Woohoo {} at {}", record.id, record.location);
        self.woohoos.set_error(None);
        self.woohoos.create_woohoo(record.clone());
        self.events.push(WoohooEvent::WoohooCreated(record.clone()));
        self.navigate(Route::FeedTab);
        Ok(record)
    }

    pub async fn delete_woohoo(&mut self, id: &str) -> Result<(), ClientError> {
        self.backend.delete_woohoo(id).await?;
        self.woohoos.delete_woohoo(id);
        Ok(())
    }

    /// Session woohoos over the sample history, newest first.
    pub fn feed(&self) -> Vec<WoohooRecord> {
        self.feed.project(&self.woohoos.woohoos)
    }

    /// Pull-to-refresh: waits, then projects again.
    pub async fn refresh_feed(&self) -> Vec<WoohooRecord> {
        sleep(self.config.delays.feed_refresh).await;
        self.feed()
    }

    /// Turning notifications off also hides whatever banner is up.
    pub fn set_notifications(&mut self, enabled: bool) {
        self.settings.notifications = enabled;
        self.banners.set_enabled(enabled);
    }

    pub fn set_location_sharing(&mut self, enabled: bool) {
        self.settings.location_sharing = enabled;
        self.locator.set_permitted(enabled);
    }

    pub fn set_woohoo_sounds(&mut self, enabled: bool) {
        self.settings.woohoo_sounds = enabled;
    }

    /// A ticker for the banner slot, honouring the current notification setting.
    pub fn ticker(&self) -> NotificationTicker<StdRng> {
        let config = NotificationConfig {
            enabled: self.settings.notifications,
            ..self.config.notifications.clone()
        };
        NotificationTicker::from_entropy(self.banners.clone(), &config)
    }

    /// Follow the visible banner, if any, to its tab.
    pub fn tap_banner(&mut self) {
        if let Some(target) = self.banners.tap() {
            self.route = target.into();
        }
    }

    pub fn dismiss_banner(&self) {
        self.banners.dismiss();
    }
}
