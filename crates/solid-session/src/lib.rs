//! Observable session lifecycle for Solid applications
//!
//! Wraps the authentication layer's callbacks in a small observable subject.
//! The OIDC token exchange itself lives outside this crate; here we only
//! track whether a session is active, whose WebID it carries, and broadcast
//! every lifecycle transition to subscribers such as caches that must clear
//! on logout.

mod event;
mod session;

pub use event::{SessionEvent, SessionState};
pub use session::Session;
