//! Versioned snapshots of an automaton.
//!
//! Conversion consumes its input, so a snapshot is the way to keep (or ship)
//! the original graph. Snapshots carry states, designations and transitions;
//! observers are not part of a snapshot.
//!
//! # Example
//!
//! ```rust
//! use statelim::fsa;
//! use statelim::snapshot::AutomatonSnapshot;
//!
//! let automaton = fsa! {
//!     states: 2,
//!     initial: 0,
//!     finals: [1],
//!     transitions: [(0, 1, "a")],
//! }
//! .unwrap();
//!
//! let json = AutomatonSnapshot::capture(&automaton).to_json().unwrap();
//! let restored = AutomatonSnapshot::<()>::from_json(&json)
//!     .unwrap()
//!     .restore()
//!     .unwrap();
//!
//! assert_eq!(restored.transition_count(), 1);
//! ```

pub mod error;

pub use error::SnapshotError;

use crate::core::{Automaton, State, StateId, Transition};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use tracing::debug;
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of an automaton.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "W: Serialize", deserialize = "W: Deserialize<'de>"))]
pub struct AutomatonSnapshot<W> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub states: Vec<State>,
    pub initial: Option<StateId>,
    pub finals: Vec<StateId>,

    /// Transitions in insertion order
    pub transitions: Vec<Transition<W>>,
}

impl<W: Clone + Eq + Hash> AutomatonSnapshot<W> {
    /// Copy the current contents of `automaton`.
    pub fn capture(automaton: &Automaton<W>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            states: automaton.states().cloned().collect(),
            initial: automaton.initial_state(),
            finals: automaton.final_states(),
            transitions: automaton.transitions().to_vec(),
        }
    }

    /// Rebuild an automaton, rejecting anything the graph store would
    /// silently drop.
    pub fn restore(&self) -> Result<Automaton<W>, SnapshotError> {
        check_version(self.version)?;

        let mut automaton = Automaton::new();
        for state in &self.states {
            let id = state.id();
            automaton
                .create_state_with_id(id.index())
                .map_err(|_| SnapshotError::DuplicateState { id })?;
            if let Some(name) = state.name() {
                automaton
                    .set_state_name(id, name)
                    .map_err(|_| SnapshotError::UnknownDesignation { id })?;
            }
            if let Some(label) = state.label() {
                automaton
                    .set_state_label(id, label)
                    .map_err(|_| SnapshotError::UnknownDesignation { id })?;
            }
        }

        if let Some(id) = self.initial {
            automaton
                .set_initial_state(id)
                .map_err(|_| SnapshotError::UnknownDesignation { id })?;
        }
        for &id in &self.finals {
            automaton
                .add_final_state(id)
                .map_err(|_| SnapshotError::UnknownDesignation { id })?;
        }

        for t in &self.transitions {
            if !automaton.add_transition(t.clone()) {
                return Err(SnapshotError::InvalidTransition {
                    from: t.from,
                    to: t.to,
                });
            }
        }

        debug!(snapshot = %self.id, states = self.states.len(), "snapshot_restored");
        Ok(automaton)
    }
}

impl<W: Serialize + DeserializeOwned> AutomatonSnapshot<W> {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserialize from JSON, checking the format version
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        check_version(snapshot.version)?;
        Ok(snapshot)
    }

    /// Serialize to bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserialize from bincode, checking the format version
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        check_version(snapshot.version)?;
        Ok(snapshot)
    }
}

fn check_version(found: u32) -> Result<(), SnapshotError> {
    if found == SNAPSHOT_VERSION {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedVersion {
            found,
            supported: SNAPSHOT_VERSION,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MarkovChain;
    use crate::dtmc;

    fn chain() -> MarkovChain {
        let mut chain = dtmc! {
            states: 3,
            initial: 0,
            finals: [2],
            transitions: [
                (0, 0, "a", "0.7"),
                (0, 1, "b", "0.3"),
                (1, 2, "c", "1"),
            ],
        }
        .unwrap();
        chain.set_state_name(StateId(1), "middle").unwrap();
        chain
    }

    fn assert_same(original: &MarkovChain, restored: &MarkovChain) {
        assert_eq!(original.state_ids(), restored.state_ids());
        assert_eq!(original.initial_state(), restored.initial_state());
        assert_eq!(original.final_states(), restored.final_states());
        assert_eq!(&*original.transitions(), &*restored.transitions());
        assert_eq!(
            restored.state(StateId(1)).unwrap().name(),
            Some("middle")
        );
    }

    #[test]
    fn json_round_trip_preserves_graph() {
        let original = chain();
        let json = AutomatonSnapshot::capture(&original).to_json().unwrap();

        let restored = AutomatonSnapshot::<crate::Probability>::from_json(&json)
            .unwrap()
            .restore()
            .unwrap();

        assert_same(&original, &restored);
        assert!(json.contains("\"0.7000000000\""));
    }

    #[test]
    fn binary_round_trip_preserves_graph() {
        let original = chain();
        let snapshot = AutomatonSnapshot::capture(&original);
        let bytes = snapshot.to_bytes().unwrap();

        let decoded = AutomatonSnapshot::<crate::Probability>::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.id, snapshot.id);
        assert_same(&original, &decoded.restore().unwrap());
    }

    #[test]
    fn newer_versions_are_rejected() {
        let mut snapshot = AutomatonSnapshot::capture(&chain());
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = serde_json::to_string(&snapshot).unwrap();

        let err = AutomatonSnapshot::<crate::Probability>::from_json(&json).unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found: 2, supported: 1 }
        ));
    }

    #[test]
    fn restore_rejects_dangling_transitions() {
        let mut snapshot = AutomatonSnapshot::capture(&chain());
        snapshot.states.retain(|s| s.id() != StateId(2));
        snapshot.finals.clear();

        let err = snapshot.restore().unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::InvalidTransition { from: StateId(1), to: StateId(2) }
        ));
    }

    #[test]
    fn restore_rejects_designations_of_missing_states() {
        let mut snapshot = AutomatonSnapshot::capture(&chain());
        snapshot.initial = Some(StateId(9));

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::UnknownDesignation { id: StateId(9) })
        ));
    }

    #[test]
    fn garbage_input_is_a_decode_error() {
        assert!(matches!(
            AutomatonSnapshot::<()>::from_json("{not json"),
            Err(SnapshotError::Decode(_))
        ));
        assert!(matches!(
            AutomatonSnapshot::<()>::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Decode(_))
        ));
    }
}
