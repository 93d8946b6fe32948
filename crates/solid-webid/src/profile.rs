//! Resolved WebID profile with recomputed view fields

use std::fmt;
use std::sync::Arc;

use solid_quint_store::{Quint, QuintPattern, QuintStore};
use solid_vocab::{FOAF, RDF, SPACE, VCARD};
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use crate::error::{Result, WebIdError};

/// Raw statement sets backing a profile's view fields.
///
/// All four collections are replaced together in a single watch send, so an
/// observer never sees one field populated while another still holds its
/// initial empty state.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub types_raw: Vec<Quint>,
    pub names_raw: Vec<Quint>,
    pub photos_raw: Vec<Quint>,
    pub storages_raw: Vec<Quint>,
}

/// A resolved WebID profile.
///
/// Constructed with every field empty, then populated in one atomic
/// assignment once the profile document fetches have settled. The view
/// accessors project the object component out of the raw statements on every
/// read: they always reflect the current raw data and cannot be set directly.
pub struct WebIdProfile {
    uri: String,
    fields: watch::Sender<ProfileFields>,
}

impl WebIdProfile {
    fn new(uri: String) -> Self {
        let (fields, _) = watch::channel(ProfileFields::default());
        Self { uri, fields }
    }

    /// The WebID this profile was resolved for
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// rdf:type declarations of the profile subject
    pub fn types(&self) -> Vec<String> {
        project(&self.fields.borrow().types_raw)
    }

    /// foaf:name labels followed by vcard:fn labels, duplicates retained
    pub fn names(&self) -> Vec<String> {
        project(&self.fields.borrow().names_raw)
    }

    /// vcard:hasPhoto references
    pub fn photos(&self) -> Vec<String> {
        project(&self.fields.borrow().photos_raw)
    }

    /// pim space:storage roots
    pub fn storages(&self) -> Vec<String> {
        project(&self.fields.borrow().storages_raw)
    }

    /// Snapshot of the raw statements backing the view fields
    pub fn fields(&self) -> ProfileFields {
        self.fields.borrow().clone()
    }

    /// Watch the raw fields. Receivers get one notification per atomic
    /// replacement of all four statement sets.
    pub fn subscribe(&self) -> watch::Receiver<ProfileFields> {
        self.fields.subscribe()
    }

    /// Resolve `uri` into a ready profile using `store`.
    pub(crate) async fn load(uri: String, store: Arc<dyn QuintStore>) -> Result<Arc<Self>> {
        if let Err(e) = Url::parse(&uri) {
            return Err(WebIdError::InvalidUri {
                uri,
                message: e.to_string(),
            });
        }
        let profile = Arc::new(Self::new(uri));
        profile.init(store.as_ref()).await?;
        Ok(profile)
    }

    /// Fetch the four statement sets from the profile document and publish
    /// them together. Each fetch targets the subject's own document; name
    /// labels merge foaf:name results ahead of vcard:fn results.
    async fn init(&self, store: &dyn QuintStore) -> Result<()> {
        let names = async {
            let (foaf_names, vcard_names) = tokio::join!(
                fetch_or_partial(store, &self.uri, FOAF.term("name")),
                fetch_or_partial(store, &self.uri, VCARD.term("fn")),
            );
            let mut merged = foaf_names?;
            merged.extend(vcard_names?);
            Ok::<Vec<Quint>, WebIdError>(merged)
        };

        let (types, names, photos, storages) = tokio::join!(
            fetch_or_partial(store, &self.uri, RDF.term("type")),
            names,
            fetch_or_partial(store, &self.uri, VCARD.term("hasPhoto")),
            fetch_or_partial(store, &self.uri, SPACE.term("storage")),
        );

        let fields = ProfileFields {
            types_raw: types?,
            names_raw: names?,
            photos_raw: photos?,
            storages_raw: storages?,
        };
        self.fields.send_replace(fields);
        Ok(())
    }
}

impl fmt::Debug for WebIdProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebIdProfile")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

/// Fetch one predicate's statements from the subject's own document,
/// substituting the attached partial result when the store reports a
/// degraded fetch. A failure without a partial fails the resolution.
async fn fetch_or_partial(store: &dyn QuintStore, uri: &str, predicate: String) -> Result<Vec<Quint>> {
    let pattern = QuintPattern::subject_predicate(uri, &predicate);
    match store.fetch_from_web(pattern, uri).await {
        Ok(quints) => Ok(quints),
        Err(failure) => match failure.partial {
            Some(partial) => {
                debug!(
                    "degraded fetch of <{}> for {}: {}",
                    predicate, uri, failure.message
                );
                Ok(partial)
            }
            None => Err(WebIdError::Resolution {
                uri: uri.to_string(),
                message: format!("fetch of <{}> failed: {}", predicate, failure.message),
            }),
        },
    }
}

fn project(quints: &[Quint]) -> Vec<String> {
    quints.iter().map(|q| q.object.clone()).collect()
}
