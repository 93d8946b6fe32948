//! Session state and lifecycle events

use serde::{Deserialize, Serialize};

/// Current authentication state of the user's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether the user is logged in
    pub is_active: bool,
    /// The logged-in user's own WebID, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_id: Option<String>,
    /// True until the first lifecycle transition has been observed
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_active: false,
            web_id: None,
            is_loading: true,
        }
    }
}

/// Lifecycle events emitted by [`crate::Session`]
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Authentication state changed (login, logout, restore)
    StateChange {
        is_active: bool,
        web_id: Option<String>,
    },
    /// The session will expire soon
    ExpirationWarning { expires_in_secs: u64 },
    /// The session has expired
    Expired,
}
