use std::collections::BTreeSet;

use crate::{alphabet::Label, simulation::Configuration, Alphabet};

use super::{StateId, TransitionId};

/// What happened to a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionChange {
    /// The transition was created with its first label.
    Created,
    /// A label was added or removed, the transition still exists.
    LabelsChanged,
    /// The transition is gone.
    Removed,
}

/// Typed notifications emitted by an [`crate::Automaton`] when it is edited and by a
/// [`crate::simulation::Simulator`] while it runs. Subscribers receive them in the order in which
/// the changes are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A state was created.
    StateAdded {
        /// Handle of the new state.
        id: StateId,
        /// Its name.
        name: String,
    },
    /// A state was removed, after all of its transitions were removed.
    StateRemoved {
        /// Handle of the removed state.
        id: StateId,
        /// The name it carried.
        name: String,
    },
    /// A state was renamed or its accepting flag changed.
    StateChanged {
        /// Handle of the state.
        id: StateId,
    },
    /// The start state was set or cleared.
    StartChanged {
        /// The new start state.
        start: Option<StateId>,
    },
    /// A transition was created, relabeled or removed.
    TransitionChanged {
        /// Handle of the transition.
        id: TransitionId,
        /// Its source.
        source: StateId,
        /// Its target.
        target: StateId,
        /// The labels after the change, empty for [`TransitionChange::Removed`].
        labels: BTreeSet<Label>,
        /// The kind of change.
        change: TransitionChange,
    },
    /// The alphabet was replaced.
    AlphabetChanged {
        /// The new alphabet.
        alphabet: Alphabet,
    },
    /// The simulator moved to a new configuration.
    ConfigurationChanged {
        /// Number of symbols consumed so far.
        position: usize,
        /// The active states.
        configuration: Configuration,
    },
    /// A full run finished.
    RunCompleted {
        /// The word that was run.
        word: String,
        /// Whether it is accepted.
        accepted: bool,
    },
}

/// A list of subscribers that are called with every emitted [`Event`].
///
/// Subscribers are not carried over when the owner is cloned.
#[derive(Default)]
pub struct Listeners<'l>(Vec<Box<dyn FnMut(&Event) + 'l>>);

impl<'l> Listeners<'l> {
    /// Registers a new subscriber.
    pub fn subscribe<F: FnMut(&Event) + 'l>(&mut self, subscriber: F) {
        self.0.push(Box::new(subscriber));
    }

    /// Hands `event` to every subscriber.
    pub fn emit(&mut self, event: &Event) {
        for subscriber in self.0.iter_mut() {
            subscriber(event);
        }
    }

    /// Returns true if nobody is listening, in which case building events can be skipped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Clone for Listeners<'_> {
    fn clone(&self) -> Self {
        Self(vec![])
    }
}

impl std::fmt::Debug for Listeners<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listeners({})", self.0.len())
    }
}
