//! In-crate stub of the quint store collaborator

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use solid_quint_store::{FetchFailure, FetchResult, Quint, QuintPattern, QuintStore};
use solid_vocab::{FOAF, RDF, SPACE, VCARD};
use tokio::sync::watch;

pub(crate) const ALICE: &str = "https://alice.example/profile/card#me";
pub(crate) const BOB: &str = "https://bob.example/profile/card#me";

/// Canned response for one (subject, predicate) pair
#[derive(Clone)]
pub(crate) enum StubResponse {
    Quints(Vec<Quint>),
    Degraded {
        partial: Vec<Quint>,
        message: &'static str,
    },
    Fail(&'static str),
}

/// Handle that releases fetches held back by [`StubStore::gate`]
pub(crate) struct Gate {
    open_tx: watch::Sender<bool>,
}

impl Gate {
    pub(crate) fn open(&self) {
        self.open_tx.send_replace(true);
    }
}

/// Stub store with canned per-pattern responses, a fetch counter, and
/// optional per-subject gates that hold fetches until opened.
pub(crate) struct StubStore {
    responses: Mutex<HashMap<(String, String), StubResponse>>,
    gates: Mutex<HashMap<String, watch::Receiver<bool>>>,
    calls: AtomicUsize,
}

impl StubStore {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn respond(&self, subject: &str, predicate: &str, response: StubResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert((subject.to_string(), predicate.to_string()), response);
    }

    /// Hold every fetch for `subject` until the returned gate is opened
    pub(crate) fn gate(&self, subject: &str) -> Gate {
        let (open_tx, open_rx) = watch::channel(false);
        self.gates
            .lock()
            .unwrap()
            .insert(subject.to_string(), open_rx);
        Gate { open_tx }
    }

    /// Total number of fetches issued against this store
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuintStore for StubStore {
    async fn fetch_from_web(&self, pattern: QuintPattern, expected_source: &str) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let subject = pattern.subject.unwrap_or_default();
        let predicate = pattern.predicate.unwrap_or_default();

        let gate = self.gates.lock().unwrap().get(&subject).cloned();
        if let Some(mut gate) = gate {
            let _ = gate.wait_for(|open| *open).await;
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(subject, predicate))
            .cloned();
        match response {
            // Like the real store, only statements loaded from the expected
            // document are served.
            Some(StubResponse::Quints(quints)) => Ok(quints
                .into_iter()
                .filter(|q| q.source == expected_source)
                .collect()),
            Some(StubResponse::Degraded { partial, message }) => {
                Err(FetchFailure::degraded(partial, message))
            }
            Some(StubResponse::Fail(message)) => Err(FetchFailure::total(message)),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn quint(subject: &str, predicate: &str, object: &str) -> Quint {
    Quint {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
        object: object.to_string(),
        graph: subject.to_string(),
        source: subject.to_string(),
    }
}

/// Seed a complete profile document for `subject`
pub(crate) fn seed_profile(store: &StubStore, subject: &str, name: &str) {
    store.respond(
        subject,
        &RDF.term("type"),
        StubResponse::Quints(vec![quint(subject, &RDF.term("type"), &FOAF.term("Person"))]),
    );
    store.respond(
        subject,
        &FOAF.term("name"),
        StubResponse::Quints(vec![quint(subject, &FOAF.term("name"), name)]),
    );
    store.respond(
        subject,
        &VCARD.term("hasPhoto"),
        StubResponse::Quints(vec![quint(
            subject,
            &VCARD.term("hasPhoto"),
            &format!("{}.png", name),
        )]),
    );
    store.respond(
        subject,
        &SPACE.term("storage"),
        StubResponse::Quints(vec![quint(
            subject,
            &SPACE.term("storage"),
            "https://storage.example/",
        )]),
    );
}
