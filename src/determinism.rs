//! Static analysis of an [`Automaton`] for features that only a nondeterministic automaton may
//! have. A state is flagged if it
//! - has an outgoing ε-transition,
//! - offers some symbol on more than one outgoing transition, or
//! - does not offer exactly the symbols of the alphabet, i.e. a transition is missing.
//!
//! The first two conditions make up classical determinism, the last one is completeness. Both
//! can also be queried on their own through [`Automaton::is_deterministic`] and
//! [`Automaton::is_complete`].

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::trace;

use crate::{alphabet::Symbol, automaton::StateId, math, Automaton};

/// One reason for flagging a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Violation {
    /// The state has an outgoing ε-transition.
    Epsilon,
    /// The symbol labels more than one outgoing transition.
    Branching(Symbol),
    /// No outgoing transition carries this symbol of the alphabet.
    Missing(Symbol),
    /// An outgoing transition carries a symbol that is not part of the alphabet.
    Foreign(Symbol),
}

impl Violation {
    /// Returns true for violations of classical determinism (ε or branching).
    pub fn breaks_determinism(&self) -> bool {
        matches!(self, Violation::Epsilon | Violation::Branching(_))
    }

    /// Returns true for violations of completeness (missing or foreign symbols).
    pub fn breaks_completeness(&self) -> bool {
        !self.breaks_determinism()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Epsilon => write!(f, "has an ε-transition"),
            Violation::Branching(sym) => write!(f, "branches on {sym}"),
            Violation::Missing(sym) => write!(f, "has no transition on {sym}"),
            Violation::Foreign(sym) => write!(f, "reads {sym}, which is not in the alphabet"),
        }
    }
}

/// The violations found for a single state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateReport {
    /// Handle of the state.
    pub state: StateId,
    /// Its name.
    pub name: String,
    /// Everything that is wrong with it, sorted.
    pub violations: Vec<Violation>,
}

/// The result of [`Automaton::determinism_report`], listing only the flagged states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeterminismReport(Vec<StateReport>);

impl DeterminismReport {
    /// Returns true if no state was flagged.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The reports of the flagged states, in creation order of the states.
    pub fn states(&self) -> &[StateReport] {
        &self.0
    }

    /// The names of the flagged states.
    pub fn names(&self) -> BTreeSet<String> {
        self.0.iter().map(|r| r.name.clone()).collect()
    }
}

impl Automaton {
    /// Collects the violations of `state`, empty if it is fine or does not exist.
    pub fn violations(&self, state: StateId) -> Vec<Violation> {
        let offered = self
            .transitions_from(state)
            .flat_map(|(_, t)| t.labels().iter().filter_map(|l| l.symbol()))
            .collect_vec();
        let distinct: BTreeSet<Symbol> = offered.iter().copied().collect();

        let mut violations = vec![];
        if self.transitions_from(state).any(|(_, t)| t.is_epsilon()) {
            violations.push(Violation::Epsilon);
        }
        violations.extend(
            math::duplicates(offered)
                .into_iter()
                .map(Violation::Branching),
        );
        violations.extend(
            self.alphabet()
                .universe()
                .filter(|sym| !distinct.contains(sym))
                .map(Violation::Missing),
        );
        violations.extend(
            distinct
                .iter()
                .filter(|&&sym| !self.alphabet().contains(sym))
                .map(|&sym| Violation::Foreign(sym)),
        );
        violations
    }

    /// Checks every state and reports the ones that are not deterministic and complete.
    pub fn determinism_report(&self) -> DeterminismReport {
        DeterminismReport(
            self.states()
                .filter_map(|(id, q)| {
                    let violations = self.violations(id);
                    if violations.is_empty() {
                        return None;
                    }
                    trace!(
                        "state {} {}",
                        q.name(),
                        violations.iter().map(ToString::to_string).join(", ")
                    );
                    Some(StateReport {
                        state: id,
                        name: q.name().to_string(),
                        violations,
                    })
                })
                .collect(),
        )
    }

    /// Returns the names of all states that have an ε-transition, branch on some symbol or miss
    /// a transition for some symbol of the alphabet.
    pub fn nondeterministic_states(&self) -> BTreeSet<String> {
        self.determinism_report().names()
    }

    /// Returns true if no state has an ε-transition or offers a symbol twice. Missing
    /// transitions are allowed.
    pub fn is_deterministic(&self) -> bool {
        self.state_ids()
            .all(|q| !self.violations(q).iter().any(Violation::breaks_determinism))
    }

    /// Returns true if every state offers exactly the symbols of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.state_ids()
            .all(|q| !self.violations(q).iter().any(Violation::breaks_completeness))
    }
}
