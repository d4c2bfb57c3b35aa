use tracing::debug;
use woohoo_protocol::{FriendRecord, FriendRequest, UserId};

/// Confirmed friends plus pending incoming requests.
#[derive(Debug, Clone, Default)]
pub struct FriendsState {
    pub friends: Vec<FriendRecord>,
    pub friend_requests: Vec<FriendRequest>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FriendsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_friends(&mut self, friends: Vec<FriendRecord>) {
        self.friends = friends;
    }

    /// Insert unless a friend with the same id is already present.
    /// Returns whether anything was added.
    pub fn add_friend(&mut self, friend: FriendRecord) -> bool {
        if self.is_friend(&friend.id) {
            debug!("{} is already a friend", friend.id);
            return false;
        }
        self.friends.push(friend);
        true
    }

    pub fn remove_friend(&mut self, id: &str) {
        self.friends.retain(|friend| friend.id != id);
    }

    pub fn is_friend(&self, id: &str) -> bool {
        self.friends.iter().any(|friend| friend.id == id)
    }

    pub fn set_friend_requests(&mut self, requests: Vec<FriendRequest>) {
        self.friend_requests = requests;
    }

    /// Appends as-is. Unlike `add_friend`, repeated requests are kept.
    pub fn add_friend_request(&mut self, request: FriendRequest) {
        self.friend_requests.push(request);
    }

    pub fn remove_friend_request(&mut self, id: &str) {
        self.friend_requests.retain(|request| request.id != id);
    }

    pub fn friend_request(&self, id: &str) -> Option<&FriendRequest> {
        self.friend_requests.iter().find(|request| request.id == id)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Selection state for the "add friends" list.
#[derive(Debug, Clone)]
pub struct FriendPicker {
    candidates: Vec<FriendRecord>,
    search: String,
}

impl FriendPicker {
    pub fn new(candidates: Vec<FriendRecord>) -> Self {
        Self {
            candidates,
            search: String::new(),
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Candidates whose name or username contains the search text,
    /// ignoring case. Everyone matches an empty search.
    pub fn filtered(&self) -> Vec<&FriendRecord> {
        let needle = self.search.to_lowercase();
        self.candidates
            .iter()
            .filter(|friend| {
                needle.is_empty()
                    || friend.name.to_lowercase().contains(&needle)
                    || friend.username.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(friend) = self.candidates.iter_mut().find(|friend| friend.id == id) {
            friend.selected = !friend.selected;
        }
    }

    pub fn selected_ids(&self) -> Vec<UserId> {
        self.candidates
            .iter()
            .filter(|friend| friend.selected)
            .map(|friend| friend.id.clone())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        self.candidates.iter().any(|friend| friend.selected)
    }

    /// Add every selected candidate to `friends`. Returns how many were new.
    pub fn commit(&self, friends: &mut FriendsState) -> usize {
        let mut added = 0;
        for friend in self.candidates.iter().filter(|friend| friend.selected) {
            if friends.add_friend(friend.clone()) {
                added += 1;
            }
        }
        added
    }
}
