use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use woohoo_protocol::{
    Ack, FriendRecord, FriendRequest, Session, User, WoohooDraft, WoohooRecord, VERIFICATION_CODE_LENGTH,
};

use crate::config::ServiceDelays;
use crate::samples::sample_friends;
use crate::state::auth::MOCK_AUTH_TOKEN;
use crate::state::next_woohoo_id;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// What a real network client would implement.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send_verification_code(&self, phone_number: &str) -> ServiceResult<Ack>;

    async fn verify_code(&self, phone_number: &str, code: &str) -> ServiceResult<Session>;

    async fn register_user(&self, user: &User) -> ServiceResult<User>;

    /// Validate a stored token and fetch the user behind it.
    async fn login_user(&self, token: &str) -> ServiceResult<User>;

    async fn logout_user(&self) -> ServiceResult<Ack>;

    /// Store a new woohoo, assigning its id and timestamp.
    async fn create_woohoo(&self, draft: WoohooDraft) -> ServiceResult<WoohooRecord>;

    async fn get_feed(&self) -> ServiceResult<Vec<WoohooRecord>>;

    async fn delete_woohoo(&self, woohoo_id: &str) -> ServiceResult<Ack>;

    async fn get_friends(&self) -> ServiceResult<Vec<FriendRecord>>;

    async fn add_friend(&self, user_id: &str) -> ServiceResult<Ack>;

    async fn remove_friend(&self, user_id: &str) -> ServiceResult<Ack>;

    async fn get_friend_requests(&self) -> ServiceResult<Vec<FriendRequest>>;

    async fn respond_to_friend_request(&self, request_id: &str, accept: bool) -> ServiceResult<Ack>;

    async fn search_users(&self, query: &str) -> ServiceResult<Vec<FriendRecord>>;
}

/// Waits out an artificial delay and then succeeds. Only code
/// verification can fail.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    delays: ServiceDelays,
}

impl MockBackend {
    pub fn new(delays: ServiceDelays) -> Self {
        Self { delays }
    }

    /// No artificial delays at all.
    pub fn instant() -> Self {
        Self::new(ServiceDelays::none())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send_verification_code(&self, phone_number: &str) -> ServiceResult<Ack> {
        sleep(self.delays.send_code).await;
        info!("Verification code sent to {}", phone_number);
        Ok(Ack::ok("Verification code sent"))
    }

    async fn verify_code(&self, phone_number: &str, code: &str) -> ServiceResult<Session> {
        sleep(self.delays.verify_code).await;
        if code.chars().count() != VERIFICATION_CODE_LENGTH {
            warn!("Error verifying code for {}: wrong length", phone_number);
            return Err(ServiceError::InvalidCode);
        }
        Ok(Session {
            token: MOCK_AUTH_TOKEN.to_string(),
            user_id: "user-123".to_string(),
            phone_number: phone_number.to_string(),
        })
    }

    async fn register_user(&self, user: &User) -> ServiceResult<User> {
        sleep(self.delays.register).await;
        let mut registered = user.clone();
        registered.id = Some("user-123".to_string());
        Ok(registered)
    }

    async fn login_user(&self, _token: &str) -> ServiceResult<User> {
        sleep(self.delays.login).await;
        Ok(User {
            id: Some("user-123".to_string()),
            name: Some("Test User".to_string()),
            username: Some("testuser".to_string()),
            profile_pic: Some(woohoo_protocol::PLACEHOLDER_PROFILE_PIC.to_string()),
        })
    }

    async fn logout_user(&self) -> ServiceResult<Ack> {
        sleep(self.delays.logout).await;
        Ok(Ack::ok("Logged out successfully"))
    }

    async fn create_woohoo(&self, draft: WoohooDraft) -> ServiceResult<WoohooRecord> {
        sleep(self.delays.create_woohoo).await;
        let record = WoohooRecord {
            id: next_woohoo_id(),
            user1: draft.user1,
            user2: draft.user2,
            location: draft.location,
            timestamp: Utc::now(),
        };
        debug!("Created woohoo {}", record.id);
        Ok(record)
    }

    async fn get_feed(&self) -> ServiceResult<Vec<WoohooRecord>> {
        sleep(self.delays.get_feed).await;
        Ok(Vec::new())
    }

    async fn delete_woohoo(&self, _woohoo_id: &str) -> ServiceResult<Ack> {
        sleep(self.delays.delete_woohoo).await;
        Ok(Ack::ok("Woohoo deleted successfully"))
    }

    async fn get_friends(&self) -> ServiceResult<Vec<FriendRecord>> {
        sleep(self.delays.get_friends).await;
        Ok(Vec::new())
    }

    async fn add_friend(&self, _user_id: &str) -> ServiceResult<Ack> {
        sleep(self.delays.friend_action).await;
        Ok(Ack::ok("Friend added successfully"))
    }

    async fn remove_friend(&self, _user_id: &str) -> ServiceResult<Ack> {
        sleep(self.delays.friend_action).await;
        Ok(Ack::ok("Friend removed successfully"))
    }

    async fn get_friend_requests(&self) -> ServiceResult<Vec<FriendRequest>> {
        sleep(self.delays.friend_requests).await;
        Ok(Vec::new())
    }

    async fn respond_to_friend_request(&self, _request_id: &str, accept: bool) -> ServiceResult<Ack> {
        sleep(self.delays.friend_action).await;
        Ok(Ack::ok(if accept {
            "Friend request accepted"
        } else {
            "Friend request declined"
        }))
    }

    async fn search_users(&self, query: &str) -> ServiceResult<Vec<FriendRecord>> {
        sleep(self.delays.search).await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(sample_friends()
            .into_iter()
            .filter(|friend| {
                friend.name.to_lowercase().contains(&needle) || friend.username.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use woohoo_protocol::UserSummary;

    fn summary(id: &str) -> UserSummary {
        UserSummary {
            id: id.to_string(),
            name: id.to_string(),
            profile_pic: "pic".to_string(),
        }
    }

    #[tokio::test]
    async fn test_verify_code_checks_length_only() {
        let backend = MockBackend::instant();
        let session = backend.verify_code("5551234567", "000000").await.unwrap();
        assert_eq!(session.token, MOCK_AUTH_TOKEN);
        assert_eq!(session.phone_number, "5551234567");

        assert_eq!(backend.verify_code("5551234567", "12345").await, Err(ServiceError::InvalidCode));
        assert_eq!(backend.verify_code("5551234567", "1234567").await, Err(ServiceError::InvalidCode));
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_wait_out_their_delay() {
        let backend = MockBackend::default();
        let start = tokio::time::Instant::now();
        backend.send_verification_code("5551234567").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));

        let start = tokio::time::Instant::now();
        backend.create_woohoo(WoohooDraft {
            user1: summary("a"),
            user2: summary("b"),
            location: "Pine Crest School".to_string(),
        })
        .await
        .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_create_woohoo_assigns_identity() {
        let backend = MockBackend::instant();
        let draft = WoohooDraft {
            user1: summary("a"),
            user2: summary("b"),
            location: "starbucks".to_string(),
        };
        let first = backend.create_woohoo(draft.clone()).await.unwrap();
        let second = backend.create_woohoo(draft).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.location, "starbucks");
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn test_search_users_matches_directory() {
        let backend = MockBackend::instant();
        let found = backend.search_users("munoz").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "8");
        assert!(backend.search_users("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_respond_message_reflects_choice() {
        let backend = MockBackend::instant();
        assert_eq!(backend.respond_to_friend_request("r1", true).await.unwrap().message, "Friend request accepted");
        assert_eq!(backend.respond_to_friend_request("r1", false).await.unwrap().message, "Friend request declined");
    }
}
