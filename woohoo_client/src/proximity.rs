use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use woohoo_protocol::UserId;

use crate::services::{ServiceError, ServiceResult};
use crate::state::next_woohoo_id;

/// What a successful scan hands back about the other phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapMatch {
    pub id: String,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

/// A pretend NFC radio: always present, finds the other phone most of the time.
pub struct MockNfc<R = StdRng> {
    support_delay: Duration,
    scan_delay: Duration,
    success_rate: f64,
    rng: R,
}

impl MockNfc<StdRng> {
    pub fn from_entropy(support_delay: Duration, scan_delay: Duration, success_rate: f64) -> Self {
        Self::new(support_delay, scan_delay, success_rate, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> MockNfc<R> {
    pub fn new(support_delay: Duration, scan_delay: Duration, success_rate: f64, rng: R) -> Self {
        Self {
            support_delay,
            scan_delay,
            success_rate,
            rng,
        }
    }

    pub async fn is_supported(&self) -> bool {
        sleep(self.support_delay).await;
        true
    }

    pub async fn scan(&mut self) -> ServiceResult<TapMatch> {
        debug!("Starting NFC scan...");
        sleep(self.scan_delay).await;

        let draw: f64 = self.rng.gen();
        if draw < self.success_rate {
            let found = TapMatch {
                id: next_woohoo_id(),
                user_id: "123".to_string(),
                timestamp: Utc::now(),
            };
            info!("NFC scan matched user {}", found.user_id);
            Ok(found)
        } else {
            warn!("NFC scan found nobody");
            Err(ServiceError::ConnectionFailed("Failed to establish NFC connection".to_string()))
        }
    }
}

/// Reverse geocoding result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placemark {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
}

/// Most specific label available for a placemark.
pub fn location_name(placemark: Option<&Placemark>) -> String {
    placemark
        .and_then(|p| p.name.clone().or_else(|| p.street.clone()).or_else(|| p.city.clone()))
        .unwrap_or_else(|| "Unknown location".to_string())
}

/// Always reports the same spot, as long as location sharing is allowed.
#[derive(Debug, Clone)]
pub struct MockLocator {
    permitted: bool,
    placemark: Placemark,
}

impl Default for MockLocator {
    fn default() -> Self {
        Self {
            permitted: true,
            placemark: Placemark {
                name: Some("Pine Crest School".to_string()),
                street: None,
                city: None,
            },
        }
    }
}

impl MockLocator {
    pub fn new(permitted: bool, placemark: Placemark) -> Self {
        Self { permitted, placemark }
    }

    pub fn set_permitted(&mut self, permitted: bool) {
        self.permitted = permitted;
    }

    pub async fn current_placemark(&self) -> ServiceResult<Placemark> {
        if !self.permitted {
            return Err(ServiceError::PermissionDenied("Location permission not granted".to_string()));
        }
        Ok(self.placemark.clone())
    }

    /// Where the user is right now, or "Unknown location" if that can't be found.
    pub async fn current_location_name(&self) -> String {
        match self.current_placemark().await {
            Ok(placemark) => location_name(Some(&placemark)),
            Err(e) => {
                warn!("Error getting location: {}", e);
                location_name(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn nfc(rng: StepRng) -> MockNfc<StepRng> {
        MockNfc::new(Duration::ZERO, Duration::ZERO, 0.8, rng)
    }

    #[tokio::test]
    async fn test_scan_success_and_failure() {
        assert!(nfc(StepRng::new(0, 0)).is_supported().await);

        let found = nfc(StepRng::new(0, 0)).scan().await.unwrap();
        assert_eq!(found.user_id, "123");

        let missed = nfc(StepRng::new(u64::MAX, 0)).scan().await;
        assert!(matches!(missed, Err(ServiceError::ConnectionFailed(_))));
    }

    #[test]
    fn test_location_name_fallbacks() {
        let street_only = Placemark {
            street: Some("2727 edison st".to_string()),
            city: Some("San Francisco".to_string()),
            ..Default::default()
        };
        assert_eq!(location_name(Some(&street_only)), "2727 edison st");

        let city_only = Placemark {
            city: Some("San Francisco".to_string()),
            ..Default::default()
        };
        assert_eq!(location_name(Some(&city_only)), "San Francisco");
        assert_eq!(location_name(Some(&Placemark::default())), "Unknown location");
        assert_eq!(location_name(None), "Unknown location");
    }

    #[tokio::test]
    async fn test_locator_respects_permission() {
        let mut locator = MockLocator::default();
        assert_eq!(locator.current_location_name().await, "Pine Crest School");

        locator.set_permitted(false);
        assert!(locator.current_placemark().await.is_err());
        assert_eq!(locator.current_location_name().await, "Unknown location");
    }
}
