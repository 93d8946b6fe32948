//! Shared session lifecycle subject

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use crate::event::{SessionEvent, SessionState};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Observable session lifecycle shared by the whole application.
///
/// Holds the latest [`SessionState`] in a watch channel and broadcasts every
/// transition as a [`SessionEvent`]. Consumers that only need the current
/// state read the watch channel; caches that must react to logout subscribe
/// to the event stream. The authentication layer drives transitions through
/// [`Session::transition`] and [`Session::expire`].
pub struct Session {
    state_tx: watch::Sender<SessionState>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Create a session in its initial restoring state
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { state_tx, event_tx }
    }

    /// Snapshot of the current session state
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Read-only watch channel over the session state
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to lifecycle events. The returned receiver is the explicit
    /// subscription handle; dropping it unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Apply an authentication state change (login, logout, restore).
    ///
    /// Any transition ends the initial loading phase.
    pub fn transition(&self, is_active: bool, web_id: Option<String>) {
        debug!("session state change: active={}", is_active);
        self.state_tx.send_replace(SessionState {
            is_active,
            web_id: web_id.clone(),
            is_loading: false,
        });
        let _ = self
            .event_tx
            .send(SessionEvent::StateChange { is_active, web_id });
    }

    /// Announce that the session will expire soon
    pub fn notify_expiration_warning(&self, expires_in_secs: u64) {
        warn!("session will expire in {}s", expires_in_secs);
        let _ = self
            .event_tx
            .send(SessionEvent::ExpirationWarning { expires_in_secs });
    }

    /// End the session because it expired
    pub fn expire(&self) {
        debug!("session expired");
        self.state_tx.send_replace(SessionState {
            is_active: false,
            web_id: None,
            is_loading: false,
        });
        let _ = self.event_tx.send(SessionEvent::Expired);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
