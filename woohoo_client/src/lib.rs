pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod i18n;
pub mod logging;
pub mod notifications;
pub mod proximity;
pub mod samples;
pub mod services;
pub mod state;
pub mod storage;
pub mod validation;

pub use app::{Settings, WoohooApp};
pub use config::ClientConfig;
pub use error::ClientError;
pub use events::{EventQueue, Route, WoohooEvent};
pub use feed::{time_ago, FeedProjection};
pub use notifications::{BannerController, NotificationTicker};

// re-exports
pub use woohoo_protocol;
