//! Core domain types
//!
//! These types are shared between the platform client (which produces
//! them from wire payloads) and the runner (which scores, ranks and
//! contacts candidates).

pub mod candidate;
pub mod credential;
pub mod job;
