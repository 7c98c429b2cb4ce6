//! Observers notified of structural changes.
//!
//! Observers let external tooling mirror an automaton (a visual editor, a
//! change log) without the elimination engine depending on them.

use super::event::GraphEvent;
use std::fmt;
use std::sync::Arc;

/// Handle returned by [`Automaton::subscribe`](super::Automaton::subscribe),
/// used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Callback invoked synchronously after each structural mutation.
///
/// The callback only receives the event, never the automaton, so it cannot
/// re-enter the graph store while the store is mid-update.
///
/// # Example
///
/// ```rust
/// use statelim::core::{FiniteAutomaton, GraphEvent, Observer};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let added = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&added);
///
/// let mut automaton = FiniteAutomaton::new();
/// automaton.subscribe(Observer::new(move |event: &GraphEvent<()>| {
///     if matches!(event, GraphEvent::StateAdded(_)) {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }
/// }));
///
/// automaton.create_state();
/// automaton.create_state();
/// assert_eq!(added.load(Ordering::SeqCst), 2);
/// ```
pub struct Observer<W> {
    callback: Arc<dyn Fn(&GraphEvent<W>) + Send + Sync>,
}

impl<W> Observer<W> {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&GraphEvent<W>) + Send + Sync + 'static,
    {
        Observer {
            callback: Arc::new(callback),
        }
    }

    /// Deliver one event.
    pub fn notify(&self, event: &GraphEvent<W>) {
        (self.callback)(event)
    }
}

impl<W> Clone for Observer<W> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<W> fmt::Debug for Observer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}
