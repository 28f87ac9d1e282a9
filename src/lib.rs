//! Library for building and simulating finite automata on finite words.
//!
//! An [`Automaton`] consists of named states, transitions between them and an [`Alphabet`].
//! Each transition carries a set of labels, where a label is either a symbol of the alphabet or
//! ε. Automata may be nondeterministic: a state can offer the same symbol on several transitions
//! and take ε-transitions without reading anything. The automaton is edited through validated
//! mutations, every one of which either succeeds completely or leaves the automaton untouched,
//! and which are reported to subscribers as [`automaton::Event`]s.
//!
//! Words are processed by a [`simulation::Simulator`], which keeps track of the set of active
//! states (a [`simulation::Configuration`]) while stepping through a word forwards and backwards.
//! A word is accepted if the configuration reached after reading all of it contains an accepting
//! state.
//!
//! Further, the crate provides
//! - a check for determinism and completeness in [`determinism`],
//! - a line based text encoding to persist automata in [`codec`],
//! - a transition table and DOT output for displaying automata,
//! - generation of random automata and words in `random` (behind the `random` feature).
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_sim::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet,
        alphabet::{Label, Symbol, EPSILON},
        automaton::{
            Automaton, Event, State, StateId, Transition, TransitionChange, TransitionId,
            TransitionItem,
        },
        determinism::{DeterminismReport, StateReport, Violation},
        math,
        simulation::{Configuration, RunOutcome, Simulator},
        Alphabet, LoadError, ValidationError,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the
/// crate and do not really fit to the top level.
pub mod math;
pub use math::Map;

/// Module that contains definitions for dealing with alphabets and transition labels.
pub mod alphabet;
pub use alphabet::Alphabet;

mod error;
pub use error::{LoadError, ValidationError};

/// Defines the editable [`Automaton`] together with its states, transitions and the events that
/// edits produce.
pub mod automaton;
pub use automaton::Automaton;

pub mod simulation;

pub mod determinism;

pub mod codec;

mod table;

pub mod dot;

/// Generation of random automata and words, mostly used for testing.
#[cfg(feature = "random")]
pub mod random;
