pub mod auth;
pub mod friends;
pub mod woohoo;

pub use auth::AuthState;
pub use friends::{FriendPicker, FriendsState};
pub use woohoo::{next_woohoo_id, WoohooState};
