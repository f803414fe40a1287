//! Data Transfer Objects
//!
//! Request and response bodies exchanged between the FutureBank server and
//! its clients (CLI, browser front-ends).

pub mod auth;
pub mod kudos;
pub mod listing;
pub mod profile;
