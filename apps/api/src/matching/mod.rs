// Resume Matching Engine
// Implements: role catalog, custom role derivation, weighted keyword matching,
// request resolution, and legacy result normalization.
// engine, custom and request are pure and synchronous: no I/O, no shared mutable state.

pub mod catalog;
pub mod custom;
pub mod engine;
pub mod handlers;
pub mod legacy;
pub mod request;

use thiserror::Error;

/// Failures surfaced by the matching core before any analysis runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Unknown job role: {0}")]
    RoleNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
