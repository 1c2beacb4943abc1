//! poliza-backend
//!
//! Typed HTTP client for the policy backend: authentication, document
//! upload, question answering, and policy drafting/editing.

pub mod auth;
pub mod client;
pub mod context;
pub mod error;
pub mod policy;
pub mod query;
pub mod upload;

pub use client::{BackendClient, BackendConfig};
pub use error::BackendError;
