//! Core domain types
//!
//! Records mirrored from the hosted backend. Ownership and mutation of these
//! rows belongs to the backend; the types here only describe whole-record
//! snapshots as they travel between the store, the server and its clients.

pub mod auth;
pub mod community;
pub mod listing;
pub mod profile;
