use bit_set::BitSet;
use itertools::Itertools;

use crate::{automaton::StateId, Automaton};

/// The set of states that are active at one position of a simulation. Configurations handed
/// out by a [`super::Simulator`] are always closed under ε-transitions.
///
/// Configurations compare and hash as sets.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Configuration(BitSet);

impl Configuration {
    /// The configuration without any active state, a dead branch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no state is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if `state` is active.
    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(state.0)
    }

    /// Iterates over the active states in ascending order of their handles.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().map(StateId)
    }

    /// Marks `state` as active, returns false if it already was.
    pub(crate) fn insert(&mut self, state: StateId) -> bool {
        self.0.insert(state.0)
    }

    /// Adds every state of `other`.
    pub fn union_with(&mut self, other: &Configuration) {
        self.0.union_with(&other.0);
    }

    /// Returns true if `self` and `other` share no state.
    pub fn is_disjoint(&self, other: &Configuration) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Returns true if some active state of `automaton` is accepting.
    pub fn is_accepting(&self, automaton: &Automaton) -> bool {
        self.iter()
            .filter_map(|q| automaton.state(q))
            .any(|q| q.is_accepting())
    }

    /// The names of the active states, sorted.
    pub fn names<'a>(&self, automaton: &'a Automaton) -> Vec<&'a str> {
        self.iter()
            .filter_map(|q| automaton.state_name(q))
            .sorted()
            .collect()
    }

    /// Renders the configuration as `{q0, q1}` using the state names of `automaton`.
    pub fn show(&self, automaton: &Automaton) -> String {
        format!("{{{}}}", self.names(automaton).join(", "))
    }
}

impl FromIterator<StateId> for Configuration {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        Self(iter.into_iter().map(|q| q.0).collect())
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_semantics() {
        let mut left = Configuration::empty();
        assert!(left.insert(StateId(40)));
        assert!(left.insert(StateId(1)));
        assert!(!left.insert(StateId(1)));

        let right: Configuration = [StateId(1), StateId(40)].into_iter().collect();
        assert_eq!(left, right);
        assert_eq!(left.len(), 2);
        assert_eq!(format!("{left:?}"), "{#1, #40}");

        let other: Configuration = [StateId(2)].into_iter().collect();
        assert!(left.is_disjoint(&other));
        left.union_with(&other);
        assert!(left.contains(StateId(2)));
        assert_eq!(left.iter().collect::<Vec<_>>(), vec![StateId(1), StateId(2), StateId(40)]);
    }
}
