use std::fmt::Display;

use super::TransitionId;

/// Stable handle of a state. Handles are handed out in increasing order and never reused
/// within one [`crate::Automaton`], so a handle of a removed state stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// The position of the state's slot.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state of an automaton. It stores its name, whether it is accepting and the handles of
/// the transitions leaving it.
///
/// Two states are equal if they carry the same name.
#[derive(Clone, Debug)]
pub struct State {
    pub(super) name: String,
    pub(super) accepting: bool,
    pub(super) outgoing: Vec<TransitionId>,
}

impl State {
    pub(super) fn new(name: String) -> Self {
        Self {
            name,
            accepting: false,
            outgoing: vec![],
        }
    }

    /// The name identifying the state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether reaching the state at the end of a word accepts it.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Handles of the transitions leaving the state, oldest first.
    pub fn outgoing(&self) -> &[TransitionId] {
        &self.outgoing
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for State {}
