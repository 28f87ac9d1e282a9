//! A line based text encoding for automata, used to persist them and to hand them to the
//! command line tool. An automaton is written as
//!
//! ```text
//! Alphabet: 0,1
//! State: "q0"
//! State: "q1" accepting
//! Transition: "q0" -> "q1" [1]
//! Transition: "q1" -> "q1" [0,1]
//! Start: "q0"
//! --END--
//! ```
//!
//! Records have to appear in this order: exactly one `Alphabet`, then any number of `State`
//! and `Transition` records, then at most one `Start`. State names are enclosed in double
//! quotes, where `\"`, `\\` and `\n` are escaped. Labels are separated by commas and ε is
//! written as `ε`. Empty lines and lines starting with `#` are skipped when reading.
//!
//! Writing goes through [`Automaton::write_text`] and [`Automaton::to_text`], reading through
//! [`Automaton::from_text`] and [`Automaton::from_reader`] (or simply `str::parse`).
//!
//! [`Automaton::write_text`]: crate::Automaton::write_text
//! [`Automaton::to_text`]: crate::Automaton::to_text
//! [`Automaton::from_text`]: crate::Automaton::from_text
//! [`Automaton::from_reader`]: crate::Automaton::from_reader

mod output;
pub use output::Encoded;

mod input;
