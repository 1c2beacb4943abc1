//! poliza-assistant
//!
//! The conversational layer: a chat session bound to a conversation thread,
//! the policy editor that routes each message to drafting, editing, or
//! question answering, and the document analysis flow.

pub mod analyze;
pub mod backend;
pub mod chat;
pub mod editor;
pub mod error;
