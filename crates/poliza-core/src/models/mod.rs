pub mod analysis;
pub mod chat;
pub mod policy;
pub mod template;
pub mod upload;
pub mod user;
