//! poliza-auth
//!
//! Sign-in flows, access-token checks, and the persisted client session.

pub mod error;
pub mod flows;
pub mod jwt;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use session::SessionContext;
