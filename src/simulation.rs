//! Simulation of an [`crate::Automaton`] on finite words. The [`Simulator`] moves through a
//! word symbol by symbol, keeping track of the [`Configuration`] (the set of active states)
//! at every position, while [`Simulator::run`] evaluates a whole word at once.

mod configuration;
pub use configuration::Configuration;

mod closure;

mod simulator;
pub use simulator::Simulator;

mod run;
pub use run::RunOutcome;
