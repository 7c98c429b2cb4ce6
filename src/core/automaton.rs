//! The mutable state/transition graph.
//!
//! `Automaton` owns its states and transitions. Transitions live in an arena
//! and are referenced by slot from two adjacency indices (outgoing and
//! incoming per state). Snapshot arrays handed out by the getters are built
//! lazily from those indices and cached until a mutation touches the state
//! they describe.

use super::error::GraphError;
use super::event::GraphEvent;
use super::observer::{Observer, ObserverId};
use super::state::{State, StateId};
use super::transition::Transition;
use crate::probability::Probability;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, trace};

/// A plain finite automaton: transitions carry labels only.
pub type FiniteAutomaton = Automaton<()>;

/// A discrete-time Markov chain: transitions carry a label and a probability.
pub type MarkovChain = Automaton<Probability>;

type Snapshot<W> = Arc<[Transition<W>]>;

struct Cache<W> {
    all: Option<Snapshot<W>>,
    from: HashMap<StateId, Snapshot<W>>,
    to: HashMap<StateId, Snapshot<W>>,
}

impl<W> Default for Cache<W> {
    fn default() -> Self {
        Self {
            all: None,
            from: HashMap::new(),
            to: HashMap::new(),
        }
    }
}

/// A finite automaton over string labels, optionally weighted.
///
/// The automaton is fully mutable in place; the elimination engine uses it
/// as scratch space. At most one state is initial, and the final states are
/// a subset of the states.
///
/// # Example
///
/// ```rust
/// use statelim::core::{FiniteAutomaton, Transition};
///
/// let mut fsa = FiniteAutomaton::new();
/// let q0 = fsa.create_state();
/// let q1 = fsa.create_state();
/// fsa.set_initial_state(q0).unwrap();
/// fsa.add_final_state(q1).unwrap();
///
/// assert!(fsa.add_transition(Transition::plain(q0, q1, "a")));
/// // Duplicates are rejected.
/// assert!(!fsa.add_transition(Transition::plain(q0, q1, "a")));
///
/// assert_eq!(fsa.transitions_from(q0).len(), 1);
/// assert_eq!(fsa.transitions_to(q1).len(), 1);
/// ```
pub struct Automaton<W> {
    states: BTreeMap<StateId, State>,
    initial: Option<StateId>,
    finals: BTreeSet<StateId>,
    slots: Vec<Option<Transition<W>>>,
    index: HashMap<Transition<W>, usize>,
    outgoing: BTreeMap<StateId, Vec<usize>>,
    incoming: BTreeMap<StateId, Vec<usize>>,
    cache: RefCell<Cache<W>>,
    observers: Vec<(ObserverId, Observer<W>)>,
    next_observer: u64,
}

impl<W> Automaton<W> {
    /// Create an automaton with no states and no transitions.
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            initial: None,
            finals: BTreeSet::new(),
            slots: Vec::new(),
            index: HashMap::new(),
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
            cache: RefCell::new(Cache::default()),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// The initial state, if one is designated.
    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    /// Final states in ascending id order.
    pub fn final_states(&self) -> Vec<StateId> {
        self.finals.iter().copied().collect()
    }

    pub fn is_initial_state(&self, id: StateId) -> bool {
        self.initial == Some(id)
    }

    pub fn is_final_state(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// All states in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    /// All state ids in ascending order.
    pub fn state_ids(&self) -> Vec<StateId> {
        self.states.keys().copied().collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.index.len()
    }

    /// Register an observer for structural changes.
    pub fn subscribe(&mut self, observer: Observer<W>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove a previously registered observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    fn emit(&self, event: impl FnOnce() -> GraphEvent<W>) {
        if self.observers.is_empty() {
            return;
        }
        let event = event();
        trace!(event = event.kind(), observers = self.observers.len(), "graph_event_dispatched");
        for (_, observer) in &self.observers {
            observer.notify(&event);
        }
    }

    fn invalidate(&self, from: StateId, to: StateId) {
        let mut cache = self.cache.borrow_mut();
        cache.all = None;
        cache.from.remove(&from);
        cache.to.remove(&to);
    }
}

impl<W: Clone + Eq + Hash> Automaton<W> {
    /// Create a state with the smallest unused id.
    pub fn create_state(&mut self) -> StateId {
        let mut candidate = 0;
        while self.states.contains_key(&StateId(candidate)) {
            candidate += 1;
        }
        self.insert_state(StateId(candidate))
    }

    /// Create a state with a caller-chosen id.
    ///
    /// Fails with [`GraphError::DuplicateState`] if the id is taken.
    pub fn create_state_with_id(&mut self, id: usize) -> Result<StateId, GraphError> {
        let id = StateId(id);
        if self.states.contains_key(&id) {
            return Err(GraphError::DuplicateState { id });
        }
        Ok(self.insert_state(id))
    }

    fn insert_state(&mut self, id: StateId) -> StateId {
        self.states.insert(id, State::new(id));
        self.outgoing.insert(id, Vec::new());
        self.incoming.insert(id, Vec::new());
        self.emit(|| GraphEvent::StateAdded(id));
        id
    }

    /// Remove a state together with every transition incident to it.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, GraphError> {
        if !self.states.contains_key(&id) {
            return Err(GraphError::UnknownState { id });
        }

        for t in self.transitions_from(id).iter() {
            self.remove_transition(t);
        }
        for t in self.transitions_to(id).iter() {
            self.remove_transition(t);
        }

        self.emit(|| GraphEvent::StateRemoved(id));
        if self.finals.remove(&id) {
            self.emit(|| GraphEvent::FinalStateRemoved(id));
        }
        if self.initial == Some(id) {
            self.initial = None;
            self.emit(|| GraphEvent::InitialStateChanged {
                old: Some(id),
                new: None,
            });
        }

        self.outgoing.remove(&id);
        self.incoming.remove(&id);
        {
            let mut cache = self.cache.borrow_mut();
            cache.from.remove(&id);
            cache.to.remove(&id);
        }

        self.states
            .remove(&id)
            .ok_or(GraphError::UnknownState { id })
    }

    pub fn set_state_name(
        &mut self,
        id: StateId,
        name: impl Into<String>,
    ) -> Result<(), GraphError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(GraphError::UnknownState { id })?;
        state.set_name(Some(name.into()));
        Ok(())
    }

    pub fn set_state_label(
        &mut self,
        id: StateId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(GraphError::UnknownState { id })?;
        state.set_label(Some(label.into()));
        Ok(())
    }

    /// Designate the initial state, returning the previous one.
    pub fn set_initial_state(&mut self, id: StateId) -> Result<Option<StateId>, GraphError> {
        if !self.states.contains_key(&id) {
            return Err(GraphError::UnknownState { id });
        }
        let old = self.initial.replace(id);
        self.emit(|| GraphEvent::InitialStateChanged {
            old,
            new: Some(id),
        });
        Ok(old)
    }

    /// Remove the initial designation, returning the previous initial state.
    pub fn clear_initial_state(&mut self) -> Option<StateId> {
        let old = self.initial.take();
        if old.is_some() {
            self.emit(|| GraphEvent::InitialStateChanged { old, new: None });
        }
        old
    }

    /// Add a state to the set of final states.
    pub fn add_final_state(&mut self, id: StateId) -> Result<(), GraphError> {
        if !self.states.contains_key(&id) {
            return Err(GraphError::UnknownState { id });
        }
        if self.finals.insert(id) {
            self.emit(|| GraphEvent::FinalStateAdded(id));
        }
        Ok(())
    }

    /// Make a state non-final. The state itself stays in the automaton.
    pub fn remove_final_state(&mut self, id: StateId) -> bool {
        let removed = self.finals.remove(&id);
        if removed {
            self.emit(|| GraphEvent::FinalStateRemoved(id));
        }
        removed
    }

    pub fn contains_transition(&self, transition: &Transition<W>) -> bool {
        self.index.contains_key(transition)
    }

    /// Insert a transition.
    ///
    /// Returns `false` without changing anything when the transition is
    /// already present or either endpoint is not a state of this automaton.
    pub fn add_transition(&mut self, transition: Transition<W>) -> bool {
        if self.index.contains_key(&transition) {
            debug!(from = %transition.from, to = %transition.to, "duplicate_transition_rejected");
            return false;
        }
        if !self.states.contains_key(&transition.from) || !self.states.contains_key(&transition.to)
        {
            debug!(from = %transition.from, to = %transition.to, "dangling_transition_rejected");
            return false;
        }

        let slot = self.slots.len();
        let (from, to) = (transition.from, transition.to);
        self.slots.push(Some(transition.clone()));
        if let Some(list) = self.outgoing.get_mut(&from) {
            list.push(slot);
        }
        if let Some(list) = self.incoming.get_mut(&to) {
            list.push(slot);
        }
        self.invalidate(from, to);
        self.emit(|| GraphEvent::TransitionAdded(transition.clone()));
        self.index.insert(transition, slot);
        true
    }

    /// Remove a transition. Returns `false` if it was not present.
    pub fn remove_transition(&mut self, transition: &Transition<W>) -> bool {
        let Some(slot) = self.index.remove(transition) else {
            return false;
        };
        self.slots[slot] = None;
        if let Some(list) = self.outgoing.get_mut(&transition.from) {
            list.retain(|&s| s != slot);
        }
        if let Some(list) = self.incoming.get_mut(&transition.to) {
            list.retain(|&s| s != slot);
        }
        self.invalidate(transition.from, transition.to);
        self.emit(|| GraphEvent::TransitionRemoved(transition.clone()));
        if self.slots.len() - self.index.len() > self.index.len() {
            self.compact();
        }
        true
    }

    /// Drop vacant arena slots, renumbering the adjacency indices. Relative
    /// order is unchanged.
    fn compact(&mut self) {
        let mut renumbered = vec![None; self.slots.len()];
        let mut live = Vec::with_capacity(self.index.len());
        for (old, slot) in std::mem::take(&mut self.slots).into_iter().enumerate() {
            if let Some(t) = slot {
                renumbered[old] = Some(live.len());
                live.push(Some(t));
            }
        }
        self.slots = live;

        let remap = |slot: &mut usize| {
            if let Some(new) = renumbered[*slot] {
                *slot = new;
            }
        };
        self.index.values_mut().for_each(remap);
        self.outgoing
            .values_mut()
            .chain(self.incoming.values_mut())
            .flatten()
            .for_each(remap);
        debug!(live = self.slots.len(), "transition_arena_compacted");
    }

    /// Swap `old` for `new`, keeping `old`'s position in the adjacency
    /// indices.
    ///
    /// If `new` is already present, `old` is simply removed. Fails if `old`
    /// is not in the automaton or `new` points at a missing state.
    pub fn replace_transition(
        &mut self,
        old: &Transition<W>,
        new: Transition<W>,
    ) -> Result<(), GraphError> {
        let slot = *self
            .index
            .get(old)
            .ok_or_else(|| GraphError::TransitionNotFound {
                from: old.from,
                to: old.to,
                label: old.label.clone(),
            })?;
        if *old == new {
            return Ok(());
        }
        if self.index.contains_key(&new) {
            self.remove_transition(old);
            return Ok(());
        }
        if !self.states.contains_key(&new.from) || !self.states.contains_key(&new.to) {
            return Err(GraphError::MissingEndpoint {
                from: new.from,
                to: new.to,
            });
        }

        if old.from != new.from {
            if let Some(list) = self.outgoing.get_mut(&old.from) {
                list.retain(|&s| s != slot);
            }
            if let Some(list) = self.outgoing.get_mut(&new.from) {
                list.push(slot);
            }
        }
        if old.to != new.to {
            if let Some(list) = self.incoming.get_mut(&old.to) {
                list.retain(|&s| s != slot);
            }
            if let Some(list) = self.incoming.get_mut(&new.to) {
                list.push(slot);
            }
        }

        self.index.remove(old);
        self.index.insert(new.clone(), slot);
        self.slots[slot] = Some(new.clone());
        self.invalidate(old.from, old.to);
        self.invalidate(new.from, new.to);
        self.emit(|| GraphEvent::TransitionReplaced {
            old: old.clone(),
            new,
        });
        Ok(())
    }

    /// Remove every transition, leaving states and designations untouched.
    pub fn clear_transitions(&mut self) {
        for t in self.transitions().iter() {
            self.remove_transition(t);
        }
        self.slots.clear();
    }

    fn collect_slots(&self, slots: &[usize]) -> Snapshot<W> {
        slots
            .iter()
            .filter_map(|&slot| self.slots[slot].clone())
            .collect()
    }

    /// Every transition, in insertion order.
    pub fn transitions(&self) -> Arc<[Transition<W>]> {
        if let Some(hit) = &self.cache.borrow().all {
            return Arc::clone(hit);
        }
        let snapshot: Snapshot<W> = self.slots.iter().flatten().cloned().collect();
        self.cache.borrow_mut().all = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Transitions leaving `id`. Empty for unknown states.
    pub fn transitions_from(&self, id: StateId) -> Arc<[Transition<W>]> {
        if let Some(hit) = self.cache.borrow().from.get(&id) {
            return Arc::clone(hit);
        }
        let Some(slots) = self.outgoing.get(&id) else {
            return Arc::from(Vec::new());
        };
        let snapshot = self.collect_slots(slots);
        self.cache.borrow_mut().from.insert(id, Arc::clone(&snapshot));
        snapshot
    }

    /// Transitions entering `id`. Empty for unknown states.
    pub fn transitions_to(&self, id: StateId) -> Arc<[Transition<W>]> {
        if let Some(hit) = self.cache.borrow().to.get(&id) {
            return Arc::clone(hit);
        }
        let Some(slots) = self.incoming.get(&id) else {
            return Arc::from(Vec::new());
        };
        let snapshot = self.collect_slots(slots);
        self.cache.borrow_mut().to.insert(id, Arc::clone(&snapshot));
        snapshot
    }

    /// Transitions from `from` to `to`.
    pub fn transitions_between(&self, from: StateId, to: StateId) -> Vec<Transition<W>> {
        self.transitions_from(from)
            .iter()
            .filter(|t| t.to == to)
            .cloned()
            .collect()
    }

    /// States reachable from `start` over transitions accepted by `passable`,
    /// `start` included.
    pub fn reachable_from<F>(&self, start: StateId, passable: F) -> BTreeSet<StateId>
    where
        F: Fn(&Transition<W>) -> bool,
    {
        let mut seen = BTreeSet::new();
        if !self.states.contains_key(&start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(current) = queue.pop_front() {
            for t in self.transitions_from(current).iter() {
                if passable(t) && seen.insert(t.to) {
                    queue.push_back(t.to);
                }
            }
        }
        seen
    }
}

impl<W> Default for Automaton<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones states, designations and transitions. Observers are not carried
/// over to the clone.
impl<W: Clone> Clone for Automaton<W> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            initial: self.initial,
            finals: self.finals.clone(),
            slots: self.slots.clone(),
            index: self.index.clone(),
            outgoing: self.outgoing.clone(),
            incoming: self.incoming.clone(),
            cache: RefCell::new(Cache::default()),
            observers: Vec::new(),
            next_observer: 0,
        }
    }
}

impl<W: fmt::Debug> fmt::Debug for Automaton<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("initial", &self.initial)
            .field("finals", &self.finals)
            .field(
                "transitions",
                &self.slots.iter().flatten().collect::<Vec<_>>(),
            )
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<W: Clone + Eq + Hash + fmt::Debug> fmt::Display for Automaton<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in self.states.values() {
            if self.is_initial_state(state.id()) {
                write!(f, "--> ")?;
            }
            write!(f, "{}", state)?;
            if self.is_final_state(state.id()) {
                write!(f, " **FINAL**")?;
            }
            writeln!(f)?;
            for t in self.transitions_from(state.id()).iter() {
                writeln!(f, "\t{}", t)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn two_states() -> (FiniteAutomaton, StateId, StateId) {
        let mut fsa = FiniteAutomaton::new();
        let a = fsa.create_state();
        let b = fsa.create_state();
        (fsa, a, b)
    }

    #[test]
    fn create_state_fills_smallest_gap() {
        let mut fsa = FiniteAutomaton::new();
        fsa.create_state_with_id(0).unwrap();
        fsa.create_state_with_id(2).unwrap();

        assert_eq!(fsa.create_state(), StateId(1));
        assert_eq!(fsa.create_state(), StateId(3));
    }

    #[test]
    fn duplicate_id_creation_is_an_error() {
        let mut fsa = FiniteAutomaton::new();
        fsa.create_state_with_id(4).unwrap();

        assert_eq!(
            fsa.create_state_with_id(4),
            Err(GraphError::DuplicateState { id: StateId(4) })
        );
        assert_eq!(fsa.state_count(), 1);
    }

    #[test]
    fn add_transition_rejects_duplicates_and_dangling_endpoints() {
        let (mut fsa, a, b) = two_states();

        assert!(fsa.add_transition(Transition::plain(a, b, "x")));
        assert!(!fsa.add_transition(Transition::plain(a, b, "x")));
        assert!(!fsa.add_transition(Transition::plain(a, StateId(9), "x")));
        assert!(fsa.add_transition(Transition::plain(a, b, "y")));

        assert_eq!(fsa.transition_count(), 2);
        assert_eq!(fsa.transitions_between(a, b).len(), 2);
    }

    #[test]
    fn snapshots_refresh_after_mutation() {
        let (mut fsa, a, b) = two_states();
        fsa.add_transition(Transition::plain(a, b, "x"));

        let before = fsa.transitions_from(a);
        assert_eq!(before.len(), 1);

        fsa.add_transition(Transition::plain(a, a, "y"));
        let after = fsa.transitions_from(a);

        assert_eq!(before.len(), 1, "old snapshot is not a live view");
        assert_eq!(after.len(), 2);
        assert_eq!(fsa.transitions().len(), 2);
        assert_eq!(fsa.transitions_to(a).len(), 1);
    }

    #[test]
    fn remove_state_cascades_to_incident_transitions() {
        let (mut fsa, a, b) = two_states();
        let c = fsa.create_state();
        fsa.set_initial_state(b).unwrap();
        fsa.add_final_state(b).unwrap();
        fsa.add_transition(Transition::plain(a, b, "x"));
        fsa.add_transition(Transition::plain(b, c, "y"));
        fsa.add_transition(Transition::plain(b, b, "z"));
        fsa.add_transition(Transition::plain(a, c, "w"));

        fsa.remove_state(b).unwrap();

        assert_eq!(fsa.transition_count(), 1);
        assert_eq!(fsa.transitions_to(c).len(), 1);
        assert!(fsa.transitions_from(b).is_empty());
        assert_eq!(fsa.initial_state(), None);
        assert!(fsa.final_states().is_empty());
        assert_eq!(
            fsa.remove_state(b).unwrap_err(),
            GraphError::UnknownState { id: b }
        );
    }

    #[test]
    fn replace_preserves_adjacency_order() {
        let (mut fsa, a, b) = two_states();
        let first = Transition::plain(a, b, "x");
        fsa.add_transition(first.clone());
        fsa.add_transition(Transition::plain(a, a, "y"));
        fsa.add_transition(Transition::plain(a, b, "z"));

        fsa.replace_transition(&first, Transition::plain(a, b, "q"))
            .unwrap();

        let labels: Vec<_> = fsa
            .transitions_from(a)
            .iter()
            .map(|t| t.label.clone())
            .collect();
        assert_eq!(labels, vec!["q", "y", "z"]);
        assert!(!fsa.contains_transition(&first));
    }

    #[test]
    fn replace_with_existing_transition_only_deletes_old() {
        let (mut fsa, a, b) = two_states();
        let old = Transition::plain(a, b, "x");
        let existing = Transition::plain(a, b, "y");
        fsa.add_transition(old.clone());
        fsa.add_transition(existing.clone());

        fsa.replace_transition(&old, existing.clone()).unwrap();

        assert_eq!(fsa.transition_count(), 1);
        assert!(fsa.contains_transition(&existing));
    }

    #[test]
    fn replace_can_move_endpoints() {
        let (mut fsa, a, b) = two_states();
        let looped = Transition::plain(a, a, "x");
        fsa.add_transition(looped.clone());

        fsa.replace_transition(&looped, Transition::plain(a, b, "x"))
            .unwrap();

        assert!(fsa.transitions_to(a).is_empty());
        assert_eq!(fsa.transitions_to(b).len(), 1);
        assert_eq!(fsa.transitions_from(a).len(), 1);
    }

    #[test]
    fn replace_missing_transition_fails_fast() {
        let (mut fsa, a, b) = two_states();
        let err = fsa
            .replace_transition(&Transition::plain(a, b, "x"), Transition::plain(a, b, "y"))
            .unwrap_err();

        assert!(matches!(err, GraphError::TransitionNotFound { .. }));
        assert_eq!(fsa.transition_count(), 0);
    }

    #[test]
    fn replace_into_missing_state_fails() {
        let (mut fsa, a, b) = two_states();
        let old = Transition::plain(a, b, "x");
        fsa.add_transition(old.clone());

        let err = fsa
            .replace_transition(&old, Transition::plain(a, StateId(42), "x"))
            .unwrap_err();

        assert!(matches!(err, GraphError::MissingEndpoint { .. }));
        assert!(fsa.contains_transition(&old));
    }

    #[test]
    fn arena_stays_bounded_under_churn() {
        let (mut fsa, a, b) = two_states();
        let kept = Transition::plain(b, a, "keep");
        fsa.add_transition(kept.clone());

        for i in 0..1000 {
            let t = Transition::plain(a, b, format!("t{i}"));
            fsa.add_transition(t.clone());
            assert!(fsa.remove_transition(&t));
        }
        fsa.add_transition(Transition::plain(a, b, "last"));

        assert!(fsa.slots.len() <= 4, "arena holds {} slots", fsa.slots.len());
        assert_eq!(fsa.transitions_from(b).to_vec(), vec![kept.clone()]);
        assert_eq!(fsa.transitions_to(a).to_vec(), vec![kept]);
        assert_eq!(fsa.transitions_from(a)[0].label, "last");
        assert!(fsa.remove_transition(&Transition::plain(a, b, "last")));
        assert_eq!(fsa.transition_count(), 1);
    }

    #[test]
    fn clear_transitions_keeps_states() {
        let (mut fsa, a, b) = two_states();
        fsa.add_transition(Transition::plain(a, b, "x"));
        fsa.add_transition(Transition::plain(b, a, "y"));

        fsa.clear_transitions();

        assert_eq!(fsa.transition_count(), 0);
        assert!(fsa.transitions().is_empty());
        assert_eq!(fsa.state_count(), 2);
    }

    #[test]
    fn observers_see_every_structural_change() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut fsa = FiniteAutomaton::new();
        let id = fsa.subscribe(Observer::new(move |event: &GraphEvent<()>| {
            sink.lock().unwrap().push(event.kind());
        }));

        let a = fsa.create_state();
        let b = fsa.create_state();
        fsa.set_initial_state(a).unwrap();
        fsa.add_final_state(b).unwrap();
        fsa.add_transition(Transition::plain(a, b, "x"));
        fsa.remove_state(b).unwrap();

        assert!(fsa.unsubscribe(id));
        fsa.create_state();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "state_added",
                "state_added",
                "initial_state_changed",
                "final_state_added",
                "transition_added",
                "transition_removed",
                "state_removed",
                "final_state_removed",
            ]
        );
    }

    #[test]
    fn clone_copies_graph_but_not_observers() {
        let (mut fsa, a, b) = two_states();
        fsa.subscribe(Observer::new(|_: &GraphEvent<()>| {}));
        fsa.add_transition(Transition::plain(a, b, "x"));

        let mut copy = fsa.clone();
        copy.remove_state(a).unwrap();

        assert_eq!(fsa.transition_count(), 1);
        assert_eq!(copy.transition_count(), 0);
        assert!(format!("{:?}", copy).contains("observers: 0"));
    }

    #[test]
    fn reachability_honors_filter() {
        let mut fsa = FiniteAutomaton::new();
        let a = fsa.create_state();
        let b = fsa.create_state();
        let c = fsa.create_state();
        fsa.add_transition(Transition::plain(a, b, "x"));
        fsa.add_transition(Transition::plain(b, c, "blocked"));

        let all = fsa.reachable_from(a, |_| true);
        let filtered = fsa.reachable_from(a, |t| t.label != "blocked");

        assert_eq!(all.len(), 3);
        assert_eq!(filtered.into_iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn display_marks_initial_and_final_states() {
        let (mut fsa, a, b) = two_states();
        fsa.set_initial_state(a).unwrap();
        fsa.add_final_state(b).unwrap();
        fsa.add_transition(Transition::plain(a, b, "x"));

        let rendered = fsa.to_string();
        assert!(rendered.starts_with("--> q0\n"));
        assert!(rendered.contains("q1 **FINAL**"));
        assert!(rendered.contains("\tq0 -> q1: \"x\""));
    }
}
