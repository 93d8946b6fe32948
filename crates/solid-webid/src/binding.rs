//! Reactive binding from a WebID reference to its resolved profile
//!
//! Re-resolves whenever the input reference changes and exposes
//! result/loading/error state. The outcome of a resolution that was
//! superseded by a newer reference is discarded without a state write.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::WebIdCache;
use crate::error::WebIdError;
use crate::profile::WebIdProfile;

/// Observable output of a [`WebIdBinding`]
#[derive(Debug, Clone, Default)]
pub struct BindingState {
    /// The resolved profile, if the current reference resolved successfully
    pub profile: Option<Arc<WebIdProfile>>,
    pub is_loading: bool,
    pub error: Option<WebIdError>,
}

/// Reactive WebID resolution bound to a changing input reference.
///
/// Created by [`resolve_webid`]. Dropping the binding stops its driver task.
pub struct WebIdBinding {
    state_rx: watch::Receiver<BindingState>,
    driver: JoinHandle<()>,
}

impl WebIdBinding {
    /// Bind to a reference that can change over time
    pub fn new(cache: Arc<WebIdCache>, input: watch::Receiver<Option<String>>) -> Self {
        let initial = match &*input.borrow() {
            Some(_) => BindingState {
                profile: None,
                is_loading: true,
                error: None,
            },
            None => BindingState::default(),
        };
        let (state_tx, state_rx) = watch::channel(initial);
        let driver = tokio::spawn(drive(cache, input, state_tx));
        Self { state_rx, driver }
    }

    /// Bind to a fixed reference that never changes
    pub fn fixed(cache: Arc<WebIdCache>, webid: Option<String>) -> Self {
        let (_input_tx, input_rx) = watch::channel(webid);
        Self::new(cache, input_rx)
    }

    /// Current snapshot of the binding state
    pub fn state(&self) -> BindingState {
        self.state_rx.borrow().clone()
    }

    /// Watch for state updates
    pub fn subscribe(&self) -> watch::Receiver<BindingState> {
        self.state_rx.clone()
    }

    /// Wait until the binding is not loading and return that state
    pub async fn settled(&self) -> BindingState {
        let mut state_rx = self.state_rx.clone();
        loop {
            {
                let state = state_rx.borrow_and_update();
                if !state.is_loading {
                    return state.clone();
                }
            }
            if state_rx.changed().await.is_err() {
                return self.state();
            }
        }
    }
}

impl Drop for WebIdBinding {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Resolve a possibly-changing WebID reference into reactive
/// result/loading/error state.
pub fn resolve_webid(cache: Arc<WebIdCache>, input: watch::Receiver<Option<String>>) -> WebIdBinding {
    WebIdBinding::new(cache, input)
}

async fn drive(
    cache: Arc<WebIdCache>,
    mut input: watch::Receiver<Option<String>>,
    state_tx: watch::Sender<BindingState>,
) {
    loop {
        let current = input.borrow_and_update().clone();
        match current {
            None => {
                let _ = state_tx.send(BindingState::default());
            }
            Some(uri) => {
                // Keep the previous profile visible while the new reference
                // is loading; only the outcome replaces it.
                let previous = state_tx.borrow().profile.clone();
                let _ = state_tx.send(BindingState {
                    profile: previous,
                    is_loading: true,
                    error: None,
                });

                tokio::select! {
                    changed = input.changed() => {
                        match changed {
                            // Superseded mid-flight: drop the outstanding
                            // resolution without touching state.
                            Ok(()) => continue,
                            // The reference can no longer change; finish the
                            // resolution and publish its outcome.
                            Err(_) => {
                                let resolved = cache.resolve(&uri).await;
                                let _ = state_tx.send(settled_state(resolved));
                                return;
                            }
                        }
                    }
                    resolved = cache.resolve(&uri) => {
                        // A settlement that raced an input change loses.
                        if input.has_changed().unwrap_or(false) {
                            continue;
                        }
                        let _ = state_tx.send(settled_state(resolved));
                    }
                }
            }
        }
        if input.changed().await.is_err() {
            return;
        }
    }
}

fn settled_state(resolved: Result<Arc<WebIdProfile>, WebIdError>) -> BindingState {
    match resolved {
        Ok(profile) => BindingState {
            profile: Some(profile),
            is_loading: false,
            error: None,
        },
        Err(error) => BindingState {
            profile: None,
            is_loading: false,
            error: Some(error),
        },
    }
}
