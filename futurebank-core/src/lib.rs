//! FutureBank Core
//!
//! Core types and rules for the FutureBank time-banking dashboard.
//!
//! This crate contains:
//! - Domain types: records mirrored from the hosted backend (Profile, Offer, Want, ...)
//! - DTOs: request/response bodies shared by the server and its clients
//! - Validation, feature flags and the dashboard view model

pub mod dashboard;
pub mod domain;
pub mod dto;
pub mod features;
pub mod kudos;
pub mod validation;
