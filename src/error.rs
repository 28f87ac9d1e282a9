use thiserror::Error;

use crate::{
    alphabet::Symbol,
    automaton::{StateId, TransitionId},
};

/// Raised when a mutation of an [`crate::Automaton`] is rejected. Whenever one of these is
/// returned, the automaton is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The given state name is empty or consists of whitespace only.
    #[error("state name cannot be empty")]
    BlankName,
    /// Another state already carries the given name.
    #[error("a state with the name \"{0}\" already exists")]
    DuplicateName(String),
    /// The handle does not refer to a state of this automaton (anymore).
    #[error("there is no state {0}")]
    UnknownState(StateId),
    /// The handle does not refer to a transition of this automaton (anymore).
    #[error("there is no transition {0}")]
    UnknownTransition(TransitionId),
    /// A transition label must either be ε or a symbol of the alphabet.
    #[error("symbol '{0}' is not part of the alphabet")]
    SymbolNotInAlphabet(Symbol),
    /// An alphabet entry or label that is not exactly one character.
    #[error("\"{0}\" is not a single symbol")]
    MalformedSymbol(String),
}

/// Errors that abort loading an automaton from its text encoding, see [`crate::codec`].
/// A failed load never produces a partially reconstructed automaton.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The line could not be parsed.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// A record was well-formed but describes an invalid automaton, e.g. a duplicate state name.
    #[error("line {line}: {source}")]
    Validation {
        /// 1-based line number.
        line: usize,
        /// The rejected mutation.
        source: ValidationError,
    },
    /// A transition refers to a state name that was not declared before.
    #[error("line {line}: transition references unknown state \"{name}\"")]
    StructuralInconsistency {
        /// 1-based line number.
        line: usize,
        /// The name that could not be resolved.
        name: String,
    },
    /// The input ended without a terminating `--END--`.
    #[error("input ended before --END--")]
    MissingEnd,
    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
