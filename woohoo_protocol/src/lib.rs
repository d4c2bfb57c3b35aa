pub mod error;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::error::Error;

pub type UserId = String;
pub type WoohooId = String;
pub type RequestId = String;

// For validation before anything is dispatched into the client state
pub const PHONE_MIN_DIGITS: usize = 10;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Picture used whenever a user hasn't picked one.
pub const PLACEHOLDER_PROFILE_PIC: &str = "https://via.placeholder.com/150";

/// Base trait for all protocol types.
pub trait ProtoType: Send + Sync + Serialize + DeserializeOwned {
    fn to_json(&self) -> Result<Value, Error> {
        serde_json::to_value(self)
            .map_err(|e| Error(e.to_string()))
    }

    fn from_json(json: Value) -> Result<Self, Error>
    where
        Self: Sized {
        serde_json::from_value(json)
            .map_err(|e| Error(e.to_string()))
    }

    fn to_json_string(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|e| Error(e.to_string()))
    }

    fn from_json_str(text: &str) -> Result<Self, Error>
    where
        Self: Sized {
        serde_json::from_str(text)
            .map_err(|e| Error(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "es" | "spanish" => Some(Language::Spanish),
            "fr" | "french" => Some(Language::French),
            _ => None,
        }
    }
}

impl ProtoType for Language {}

/// The signed-in user. Built up one field at a time during onboarding,
/// so every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

impl User {
    /// Stand-in user for a session that finished without onboarding data.
    pub fn placeholder() -> Self {
        Self {
            id: Some("current-user".to_string()),
            name: Some("You".to_string()),
            username: Some("yourusername".to_string()),
            profile_pic: Some(PLACEHOLDER_PROFILE_PIC.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.id.is_some() && self.name.is_some() && self.username.is_some() && self.profile_pic.is_some()
    }

    /// The participant view of this user, falling back to the placeholder
    /// values for anything onboarding left empty.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone().unwrap_or_else(|| "current-user".to_string()),
            name: self.name.clone().unwrap_or_else(|| "You".to_string()),
            profile_pic: self
                .profile_pic
                .clone()
                .unwrap_or_else(|| "https://via.placeholder.com/40".to_string()),
        }
    }
}

impl ProtoType for User {}

/// One side of a woohoo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub profile_pic: String,
}

impl ProtoType for UserSummary {}

/// A confirmed friend, or a candidate while picking friends.
/// `selected` is UI selection only and says nothing about the relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRecord {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub profile_pic: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl FriendRecord {
    pub fn new(id: &str, name: &str, username: &str, profile_pic: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            username: username.to_string(),
            profile_pic: profile_pic.to_string(),
            selected: false,
            group: false,
            from: None,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

impl ProtoType for FriendRecord {}

/// An incoming friend request waiting on a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub name: String,
    pub username: String,
    pub profile_pic: String,
}

impl FriendRequest {
    /// The friend this request turns into once accepted.
    pub fn to_friend(&self) -> FriendRecord {
        let mut friend = FriendRecord::new(&self.user_id, &self.name, &self.username, &self.profile_pic);
        friend.from = Some(self.id.clone());
        friend
    }
}

impl ProtoType for FriendRequest {}

/// A logged meetup between two users. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WoohooRecord {
    pub id: WoohooId,
    pub user1: UserSummary,
    pub user2: UserSummary,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl ProtoType for WoohooRecord {}

/// What a woohoo looks like before the backend has given it an id and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WoohooDraft {
    pub user1: UserSummary,
    pub user2: UserSummary,
    pub location: String,
}

impl ProtoType for WoohooDraft {}

/// The tab a notification banner opens when tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavTarget {
    WoohooTab,
    FriendsTab,
    FeedTab,
}

impl std::fmt::Display for NavTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavTarget::WoohooTab => write!(f, "WoohooTab"),
            NavTarget::FriendsTab => write!(f, "FriendsTab"),
            NavTarget::FeedTab => write!(f, "FeedTab"),
        }
    }
}

/// Banner categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Woohoo,
    FriendRequest,
    FriendWoohoo,
}

impl BannerKind {
    pub const ALL: [BannerKind; 3] = [BannerKind::Woohoo, BannerKind::FriendRequest, BannerKind::FriendWoohoo];

    pub fn nav_target(&self) -> NavTarget {
        match self {
            BannerKind::Woohoo => NavTarget::WoohooTab,
            BannerKind::FriendRequest => NavTarget::FriendsTab,
            BannerKind::FriendWoohoo => NavTarget::FeedTab,
        }
    }
}

impl std::fmt::Display for BannerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BannerKind::Woohoo => write!(f, "woohoo"),
            BannerKind::FriendRequest => write!(f, "friend_request"),
            BannerKind::FriendWoohoo => write!(f, "friend_woohoo"),
        }
    }
}

/// An ephemeral in-app notification. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationBanner {
    #[serde(rename = "type")]
    pub kind: BannerKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub data: Value,
}

impl ProtoType for NotificationBanner {}

/// Generic success payload from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

impl ProtoType for Ack {}

/// Result of a successful code verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub phone_number: String,
}

impl ProtoType for Session {}
