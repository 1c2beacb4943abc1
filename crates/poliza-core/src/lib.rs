//! poliza-core
//!
//! Pure domain types and text heuristics for the policy assistant: the
//! intent classifier, the diff-annotated document model, and the
//! accept/reject review workflow. No I/O; this is the shared vocabulary of
//! the Póliza system.

pub mod document;
pub mod error;
pub mod intent;
pub mod models;
pub mod review;
