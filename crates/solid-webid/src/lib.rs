//! WebID profile resolution for Solid applications
//!
//! Resolves a WebID URI into a [`WebIdProfile`] built from the profile
//! document's own statements. Resolutions are deduplicated per URI in a
//! session-scoped [`WebIdCache`] and surfaced to UI code through the
//! reactive [`WebIdBinding`].
//!
//! Profiles are read as defined in <https://solid.github.io/webid-profile/>;
//! extended profile documents are not followed.

mod binding;
mod cache;
mod error;
mod profile;
#[cfg(test)]
mod testing;

pub use binding::{resolve_webid, BindingState, WebIdBinding};
pub use cache::WebIdCache;
pub use error::{Result, WebIdError};
pub use profile::{ProfileFields, WebIdProfile};
