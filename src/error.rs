//! Simulation error types
//!
//! The simulation has no I/O, so this only covers bad tuning data and
//! broken generation invariants.

use thiserror::Error;

/// Errors surfaced by session construction, reset and ticking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Tuning values that cannot produce a playable world.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every lane type was excluded by its run cap.
    #[error("no lane type available (river run {river}, grass run {grass}, road run {road})")]
    NoLaneCandidates {
        /// Current river run.
        river: u32,
        /// Current grass run.
        grass: u32,
        /// Current road run.
        road: u32,
    },

    /// Configuration JSON could not be parsed.
    #[error("malformed configuration JSON: {0}")]
    Json(String),
}
