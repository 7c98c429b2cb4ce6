//! Snapshot error types.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur while saving or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Encoding to JSON or binary failed
    #[error("Snapshot encoding failed: {0}")]
    Encode(String),

    /// Decoding from JSON or binary failed
    #[error("Snapshot decoding failed: {0}")]
    Decode(String),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Snapshot lists state {id} more than once")]
    DuplicateState { id: StateId },

    /// Initial or final designation of a state the snapshot does not list
    #[error("Snapshot designates missing state {id}")]
    UnknownDesignation { id: StateId },

    #[error("Snapshot transition {from} -> {to} is duplicated or has a missing endpoint")]
    InvalidTransition { from: StateId, to: StateId },
}
