//! Scout Core
//!
//! Core types and rules for the Scout candidate-sourcing engine.
//!
//! This crate contains:
//! - Domain types: requisitions, candidate profiles, contact handles, credentials
//! - DTOs: wire shapes of the recruiting platform's JSON payloads
//! - Reference data: allow-lists and the flat-file parsers that load them
//! - Scoring: the candidate rubric and the stable ranking built on it

pub mod domain;
pub mod dto;
pub mod reference;
pub mod scoring;
