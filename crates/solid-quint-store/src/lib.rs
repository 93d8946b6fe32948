//! Quint data model and web-backed store contract
//!
//! Defines the statement ("quint") data model, the store collaborator trait
//! used to pull a document's statements from the web, and a caching wrapper
//! whose results are dropped when the user's session ends. The network
//! fetch, RDF parsing, and query engine behind the trait live in the store
//! implementation, not here.

mod cached;
mod store;
mod types;

pub use cached::SessionCachedStore;
pub use store::{FetchFailure, FetchResult, QuintStore};
pub use types::{Quint, QuintPattern};
