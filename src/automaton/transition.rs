use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;

use crate::alphabet::{Label, Symbol};

use super::StateId;

/// Stable handle of a transition, never reused within one [`crate::Automaton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub(crate) usize);

impl TransitionId {
    /// The position of the transition's slot.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Connects a source with a target state. All labels between the same ordered pair of states
/// are collected in one transition, and the label set of a transition that is part of an
/// automaton is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub(super) source: StateId,
    pub(super) target: StateId,
    pub(super) labels: BTreeSet<Label>,
}

impl Transition {
    pub(super) fn new(source: StateId, target: StateId, label: Label) -> Self {
        Self {
            source,
            target,
            labels: BTreeSet::from([label]),
        }
    }

    /// The state the transition leaves.
    pub fn source(&self) -> StateId {
        self.source
    }

    /// The state the transition leads to.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// All labels, ε first.
    pub fn labels(&self) -> &BTreeSet<Label> {
        &self.labels
    }

    /// Returns true if the transition carries `label`.
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Returns true if the transition can be taken without consuming input.
    pub fn is_epsilon(&self) -> bool {
        self.has_label(&Label::Epsilon)
    }

    /// Returns true if the transition is taken when reading `sym`.
    pub fn matches(&self, sym: Symbol) -> bool {
        self.has_label(&Label::Symbol(sym))
    }

    /// The labels joined by `", "`, the way they are shown next to an edge.
    pub fn label_text(&self) -> String {
        self.labels.iter().join(", ")
    }
}

/// A single (transition, label) pair, which is the unit that is listed and deleted by an
/// editing surface. Displays as `δ(source, label) = target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionItem<'a> {
    /// Handle of the transition carrying the label.
    pub transition: TransitionId,
    /// Name of the source state.
    pub source: &'a str,
    /// The label.
    pub label: Label,
    /// Name of the target state.
    pub target: &'a str,
}

impl Display for TransitionItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "δ({}, {}) = {}", self.source, self.label, self.target)
    }
}
