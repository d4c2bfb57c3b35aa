use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use woohoo_protocol::{ProtoType, User};

use crate::storage::{KeyValueStore, AUTH_TOKEN_KEY, USER_DATA_KEY};

/// The credential every successful verification hands out.
pub const MOCK_AUTH_TOKEN: &str = "mock-auth-token";

/// Session identity and onboarding progress. None of the mutations fail:
/// a failed durable write is logged and in-memory state stays as it is.
pub struct AuthState {
    is_authenticated: bool,
    token: Option<String>,
    phone_number: Option<String>,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
    storage: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("is_authenticated", &self.is_authenticated)
            .field("token", &self.token)
            .field("phone_number", &self.phone_number)
            .field("user", &self.user)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl AuthState {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            is_authenticated: false,
            token: None,
            phone_number: None,
            user: None,
            loading: false,
            error: None,
            storage,
        }
    }

    /// Read the stored session once at startup. Any storage failure leaves
    /// the session unauthenticated.
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut state = Self::new(storage);

        let token = match state.storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Error checking auth status: {}", e);
                return state;
            }
        };

        let Some(token) = token else {
            debug!("No stored session");
            return state;
        };

        let user = match state.storage.get(USER_DATA_KEY) {
            Ok(Some(json)) => match User::from_json_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Stored user is unreadable: {}", e);
                    return state;
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Error checking auth status: {}", e);
                return state;
            }
        };

        state.token = Some(token);
        state.user = user;
        state.is_authenticated = true;
        state.user.get_or_insert_with(User::placeholder);
        info!("Restored stored session");
        state
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_phone_number(&mut self, phone: &str) {
        self.phone_number = Some(phone.to_string());
    }

    /// Doesn't look at the code; the backend already accepted it.
    pub fn verify_code(&mut self, _code: &str) {
        self.token = Some(MOCK_AUTH_TOKEN.to_string());
        self.persist(AUTH_TOKEN_KEY, MOCK_AUTH_TOKEN);
    }

    pub fn set_user_name(&mut self, name: &str) {
        self.ensure_user().name = Some(name.to_string());
    }

    pub fn set_username(&mut self, username: &str) {
        self.ensure_user().username = Some(username.to_string());
    }

    pub fn set_profile_pic(&mut self, uri: &str) {
        self.ensure_user().profile_pic = Some(uri.to_string());
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.is_authenticated = authenticated;

        if authenticated && self.user.is_none() {
            self.user = Some(User::placeholder());
        }

        let json = match self.user.as_ref().map(|user| user.to_json_string()) {
            Some(Ok(json)) => json,
            Some(Err(e)) => {
                warn!("Failed to encode user for storage: {}", e);
                return;
            }
            None => return,
        };
        self.persist(USER_DATA_KEY, &json);
    }

    pub fn logout(&mut self) {
        self.is_authenticated = false;
        self.token = None;
        self.user = None;

        for key in [AUTH_TOKEN_KEY, USER_DATA_KEY] {
            if let Err(e) = self.storage.delete(key) {
                warn!("Failed to clear {} from storage: {}", key, e);
            }
        }
        info!("Logged out");
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn ensure_user(&mut self) -> &mut User {
        self.user.get_or_insert_with(User::default)
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }
}
