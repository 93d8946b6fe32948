//! Session-scoped cache in front of a quint store
//!
//! Fetched results live until the session becomes inactive, at which point
//! the whole cache is dropped so the next fetch hits the web again with
//! fresh credentials. Failures are never cached here; only authoritative
//! results are.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use solid_session::{Session, SessionEvent};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::store::{FetchResult, QuintStore};
use crate::types::{Quint, QuintPattern};

/// Caching wrapper around a [`QuintStore`], cleared wholesale on logout.
pub struct SessionCachedStore<S> {
    inner: S,
    results: Cache<String, Arc<Vec<Quint>>>,
    watcher: JoinHandle<()>,
}

impl<S: QuintStore> SessionCachedStore<S> {
    /// Wrap `inner`, clearing cached results whenever `session` becomes
    /// inactive. The session subscription lives until the wrapper is dropped.
    pub fn new(inner: S, session: &Session) -> Self {
        let results: Cache<String, Arc<Vec<Quint>>> = Cache::builder().build();
        let watcher = tokio::spawn(watch_session(session.subscribe(), results.clone()));
        Self {
            inner,
            results,
            watcher,
        }
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.results.invalidate_all();
    }
}

impl<S> Drop for SessionCachedStore<S> {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[async_trait]
impl<S: QuintStore> QuintStore for SessionCachedStore<S> {
    async fn fetch_from_web(&self, pattern: QuintPattern, expected_source: &str) -> FetchResult {
        let key = pattern.cache_key(expected_source);
        if let Some(hit) = self.results.get(&key).await {
            return Ok(hit.as_ref().clone());
        }

        let quints = self.inner.fetch_from_web(pattern, expected_source).await?;
        self.results.insert(key, Arc::new(quints.clone())).await;
        Ok(quints)
    }
}

async fn watch_session(
    mut events: broadcast::Receiver<SessionEvent>,
    results: Cache<String, Arc<Vec<Quint>>>,
) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::StateChange {
                is_active: false, ..
            })
            | Ok(SessionEvent::Expired) => {
                debug!("session inactive, clearing quint result cache");
                results.invalidate_all();
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => {
                // A lagged receiver may have missed a logout; invalidate.
                results.invalidate_all();
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
