use std::env;
use std::path::PathBuf;
use std::time::Duration;

use woohoo_protocol::Language;

/// Artificial delays used by the mock backend and the simulated tap flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDelays {
    pub send_code: Duration,
    pub verify_code: Duration,
    pub register: Duration,
    pub login: Duration,
    pub logout: Duration,
    pub create_woohoo: Duration,
    pub get_feed: Duration,
    pub delete_woohoo: Duration,
    pub get_friends: Duration,
    pub friend_action: Duration,
    pub friend_requests: Duration,
    pub search: Duration,
    pub nfc_support: Duration,
    pub nfc_scan: Duration,
    pub scan_to_loading: Duration,
    pub loading_to_record: Duration,
    pub feed_refresh: Duration,
}

impl Default for ServiceDelays {
    fn default() -> Self {
        Self {
            send_code: Duration::from_millis(1000),
            verify_code: Duration::from_millis(1000),
            register: Duration::from_millis(1500),
            login: Duration::from_millis(1000),
            logout: Duration::from_millis(500),
            create_woohoo: Duration::from_millis(1500),
            get_feed: Duration::from_millis(1000),
            delete_woohoo: Duration::from_millis(800),
            get_friends: Duration::from_millis(1000),
            friend_action: Duration::from_millis(800),
            friend_requests: Duration::from_millis(1000),
            search: Duration::from_millis(1000),
            nfc_support: Duration::from_millis(500),
            nfc_scan: Duration::from_millis(3000),
            scan_to_loading: Duration::from_millis(2000),
            loading_to_record: Duration::from_millis(3000),
            feed_refresh: Duration::from_millis(1500),
        }
    }
}

impl ServiceDelays {
    /// Every delay set to zero.
    pub fn none() -> Self {
        Self {
            send_code: Duration::ZERO,
            verify_code: Duration::ZERO,
            register: Duration::ZERO,
            login: Duration::ZERO,
            logout: Duration::ZERO,
            create_woohoo: Duration::ZERO,
            get_feed: Duration::ZERO,
            delete_woohoo: Duration::ZERO,
            get_friends: Duration::ZERO,
            friend_action: Duration::ZERO,
            friend_requests: Duration::ZERO,
            search: Duration::ZERO,
            nfc_support: Duration::ZERO,
            nfc_scan: Duration::ZERO,
            scan_to_loading: Duration::ZERO,
            loading_to_record: Duration::ZERO,
            feed_refresh: Duration::ZERO,
        }
    }
}

/// Settings for the notification ticker and banner slot.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// How often the ticker considers surfacing a banner.
    pub tick_interval: Duration,
    /// How long a banner stays up before it hides itself.
    pub banner_duration: Duration,
    /// Chance per tick of showing a banner, within 0..=1.
    pub show_probability: f64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval: Duration::from_secs(30),
            banner_duration: Duration::from_millis(4000),
            show_probability: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// JSON file backing durable storage. `None` keeps everything in memory.
    pub storage_path: Option<PathBuf>,
    pub language: Language,
    pub notifications: NotificationConfig,
    pub delays: ServiceDelays,
    /// Chance that a simulated NFC scan finds the other phone.
    pub scan_success_rate: f64,
    pub location_sharing: bool,
    /// How long after sending a code before another can be requested.
    pub resend_cooldown: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            language: Language::English,
            notifications: NotificationConfig::default(),
            delays: ServiceDelays::default(),
            scan_success_rate: 0.8,
            location_sharing: true,
            resend_cooldown: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("WOOHOO_STORAGE_PATH").filter(|p| !p.trim().is_empty()) {
            config.storage_path = Some(PathBuf::from(path));
        }

        if let Some(code) = lookup("WOOHOO_LANGUAGE") {
            config.language = Language::from_code(&code)
                .ok_or_else(|| ConfigError::invalid("WOOHOO_LANGUAGE", &code))?;
        }

        if let Some(value) = lookup("WOOHOO_NOTIFICATIONS") {
            config.notifications.enabled = parse_bool("WOOHOO_NOTIFICATIONS", &value)?;
        }

        if let Some(value) = lookup("WOOHOO_TICK_INTERVAL_SECS") {
            let secs: u64 = value
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::invalid("WOOHOO_TICK_INTERVAL_SECS", &value))?;
            config.notifications.tick_interval = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("WOOHOO_BANNER_DURATION_MS") {
            let millis: u64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("WOOHOO_BANNER_DURATION_MS", &value))?;
            config.notifications.banner_duration = Duration::from_millis(millis);
        }

        if let Some(value) = lookup("WOOHOO_BANNER_PROBABILITY") {
            config.notifications.show_probability = parse_probability("WOOHOO_BANNER_PROBABILITY", &value)?;
        }

        if let Some(value) = lookup("WOOHOO_SCAN_SUCCESS_RATE") {
            config.scan_success_rate = parse_probability("WOOHOO_SCAN_SUCCESS_RATE", &value)?;
        }

        if let Some(value) = lookup("WOOHOO_INSTANT_SERVICES") {
            if parse_bool("WOOHOO_INSTANT_SERVICES", &value)? {
                config.delays = ServiceDelays::none();
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value)),
    }
}

fn parse_probability(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| (0.0..=1.0).contains(p))
        .ok_or_else(|| ConfigError::invalid(key, value))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
        }
    }
}
