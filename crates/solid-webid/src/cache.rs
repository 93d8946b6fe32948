//! Process-wide WebID resolution cache
//!
//! Keyed by WebID URI. The pending resolution future is inserted into the
//! map before any fetch work can run, so a second `resolve` for the same URI
//! always joins the first instead of issuing its own fetches. Entries,
//! including cached failures, are never evicted individually; the whole map
//! is cleared when the session becomes inactive. Known limitation: profiles
//! already handed to callers are not retracted by a clear, only future
//! lookups start fresh.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use solid_quint_store::QuintStore;
use solid_session::{Session, SessionEvent};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Result;
use crate::profile::WebIdProfile;

type ResolutionFuture = Shared<BoxFuture<'static, Result<Arc<WebIdProfile>>>>;

/// Deduplicating cache of WebID resolutions, cleared on session end.
pub struct WebIdCache {
    store: Arc<dyn QuintStore>,
    entries: Arc<Mutex<HashMap<String, ResolutionFuture>>>,
    watcher: JoinHandle<()>,
}

impl WebIdCache {
    /// Create a cache backed by `store`, cleared whenever `session` becomes
    /// inactive. The session subscription lives until the cache is dropped.
    pub fn new(store: Arc<dyn QuintStore>, session: &Session) -> Self {
        let entries = Arc::new(Mutex::new(HashMap::new()));
        let watcher = tokio::spawn(watch_session(session.subscribe(), entries.clone()));
        Self {
            store,
            entries,
            watcher,
        }
    }

    /// Resolve a WebID to its profile, joining any resolution already in
    /// flight or settled for the same URI. A failed resolution is cached and
    /// replayed to later callers until the next session invalidation.
    pub async fn resolve(&self, uri: &str) -> Result<Arc<WebIdProfile>> {
        let resolution = {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            match entries.get(uri) {
                Some(existing) => existing.clone(),
                None => {
                    debug!("resolving WebID {}", uri);
                    let resolution = WebIdProfile::load(uri.to_string(), self.store.clone())
                        .boxed()
                        .shared();
                    entries.insert(uri.to_string(), resolution.clone());
                    // Detached driver: the resolution runs to completion even
                    // if every caller stops awaiting it.
                    tokio::spawn(resolution.clone().map(|_| ()));
                    resolution
                }
            }
        };
        resolution.await
    }

    /// Number of cached resolutions, pending or settled
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for WebIdCache {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

async fn watch_session(
    mut events: broadcast::Receiver<SessionEvent>,
    entries: Arc<Mutex<HashMap<String, ResolutionFuture>>>,
) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::StateChange {
                is_active: false, ..
            })
            | Ok(SessionEvent::Expired) => {
                debug!("session inactive, clearing WebID resolution cache");
                entries.lock().expect("cache lock poisoned").clear();
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => {
                // A lagged receiver may have missed a logout; invalidate.
                entries.lock().expect("cache lock poisoned").clear();
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
