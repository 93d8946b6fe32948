//! RDF vocabulary terms used by WebID profile documents
//!
//! Provides the handful of namespaces needed to read a WebID profile:
//! rdf:type, foaf:name, vcard:fn / vcard:hasPhoto, and pim space:storage.

/// An RDF namespace that expands local names into full term URIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace(&'static str);

impl Namespace {
    /// Expand a local name, e.g. `FOAF.term("name")`
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.0, local)
    }

    /// The namespace URI itself
    pub fn uri(&self) -> &'static str {
        self.0
    }
}

pub const RDF: Namespace = Namespace("http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const FOAF: Namespace = Namespace("http://xmlns.com/foaf/0.1/");
pub const VCARD: Namespace = Namespace("http://www.w3.org/2006/vcard/ns#");
pub const SPACE: Namespace = Namespace("http://www.w3.org/ns/pim/space#");
