use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::{Event, Listeners},
    Automaton,
};

use super::Configuration;

/// Drives a word through an [`Automaton`] one symbol at a time, forwards and backwards.
///
/// The simulator keeps a history of configurations: the ε-closure of the start state at the
/// bottom and one configuration per consumed symbol on top of it. Stepping back pops the top,
/// stepping forward always recomputes.
///
/// A simulator borrows its automaton for as long as it lives, so the automaton cannot be
/// edited in the middle of a word. To edit, drop the simulator and set up a new one afterwards.
///
/// ```
/// use automata_sim::prelude::*;
///
/// let mut aut = Automaton::for_alphabet(Alphabet::parse("a").unwrap());
/// let q0 = aut.add_state("q0").unwrap();
/// let q1 = aut.add_state("q1").unwrap();
/// aut.add_transition(q0, q1, 'a').unwrap();
/// aut.set_accepting(q1, true).unwrap();
///
/// let mut sim = Simulator::new(&aut);
/// sim.set_up("aa");
/// assert!(sim.step_forward());
/// assert!(sim.is_accepting());
/// assert!(sim.step_forward());
/// assert!(sim.current().is_empty());
/// assert!(!sim.step_forward());
/// assert!(sim.step_back());
/// assert_eq!(sim.current().show(&aut), "{q1}");
/// ```
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    word: Vec<Symbol>,
    initial: Configuration,
    steps: Vec<Configuration>,
    listeners: Listeners<'a>,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator for `automaton`, positioned at the start of the empty word.
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            word: vec![],
            initial: automaton.epsilon_closure(automaton.start()),
            steps: vec![],
            listeners: Listeners::default(),
        }
    }

    /// Registers a subscriber that receives [`Event::ConfigurationChanged`] on every setup and
    /// step and [`Event::RunCompleted`] after every full run.
    pub fn subscribe<F: FnMut(&Event) + 'a>(&mut self, subscriber: F) {
        self.listeners.subscribe(subscriber);
    }

    /// The simulated automaton.
    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    /// The word that is being simulated.
    pub fn word(&self) -> &[Symbol] {
        &self.word
    }

    /// Number of symbols consumed so far.
    pub fn position(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the whole word has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position() >= self.word.len()
    }

    /// The symbol that is consumed by the next forward step.
    pub fn next_symbol(&self) -> Option<Symbol> {
        self.word.get(self.position()).copied()
    }

    /// The configuration at the current position.
    pub fn current(&self) -> &Configuration {
        self.steps.last().unwrap_or(&self.initial)
    }

    /// Returns true if the current configuration contains an accepting state.
    pub fn is_accepting(&self) -> bool {
        self.current().is_accepting(self.automaton)
    }

    /// Iterates over the configurations from the initial one up to the current one.
    pub fn history(&self) -> impl Iterator<Item = &Configuration> + '_ {
        std::iter::once(&self.initial).chain(self.steps.iter())
    }

    pub(super) fn emit(&mut self, event: Event) {
        if !self.listeners.is_empty() {
            self.listeners.emit(&event);
        }
    }

    fn notify(&mut self) {
        if !self.listeners.is_empty() {
            let event = Event::ConfigurationChanged {
                position: self.position(),
                configuration: self.current().clone(),
            };
            self.listeners.emit(&event);
        }
    }

    /// Starts simulating `word`: goes back to position 0, where the only configuration is the
    /// ε-closure of the start state (empty if there is none), and reports it to subscribers.
    pub fn set_up(&mut self, word: &str) {
        self.word = word.chars().collect();
        self.initial = self.automaton.epsilon_closure(self.automaton.start());
        self.steps.clear();
        trace!(
            "set up \"{word}\" starting in {}",
            self.initial.show(self.automaton)
        );
        self.notify();
    }

    /// Consumes the next symbol and pushes the reached configuration. Returns false and does
    /// nothing if the word is exhausted.
    pub fn step_forward(&mut self) -> bool {
        let Some(sym) = self.next_symbol() else {
            return false;
        };
        let next = self.automaton.successor_configuration(self.current(), sym);
        self.steps.push(next);
        trace!(
            "position {}: {}",
            self.position(),
            self.current().show(self.automaton)
        );
        self.notify();
        true
    }

    /// Discards the current configuration and returns to the previous position. Returns false
    /// and does nothing at position 0.
    pub fn step_back(&mut self) -> bool {
        if self.steps.pop().is_none() {
            return false;
        }
        trace!(
            "back to position {}: {}",
            self.position(),
            self.current().show(self.automaton)
        );
        self.notify();
        true
    }

    /// Forgets the history built so far without notifying anyone, the simulator is back at
    /// position 0 of the current word.
    pub(super) fn discard_history(&mut self) {
        self.steps.clear();
    }
}

impl std::fmt::Debug for Simulator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("word", &self.word.iter().collect::<String>())
            .field("position", &self.position())
            .field("current", &self.current().show(self.automaton))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::prelude::*;

    fn ends_in_one() -> Automaton {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("0,1").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        aut.add_transition(q0, q0, '0').unwrap();
        aut.add_transition(q0, q0, '1').unwrap();
        aut.add_transition(q0, q1, '1').unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut
    }

    #[test_log::test]
    fn stepping_forward_and_back() {
        let aut = ends_in_one();
        let mut sim = Simulator::new(&aut);
        sim.set_up("101");
        assert_eq!(sim.position(), 0);
        assert_eq!(sim.current().show(&aut), "{q0}");

        assert!(sim.step_forward());
        assert_eq!(sim.current().show(&aut), "{q0, q1}");
        assert!(sim.is_accepting());
        assert!(sim.step_forward());
        assert_eq!(sim.current().show(&aut), "{q0}");
        assert!(sim.step_forward());
        assert!(sim.is_exhausted());
        assert!(!sim.step_forward());
        assert_eq!(sim.position(), 3);

        assert!(sim.step_back());
        assert!(sim.step_back());
        assert_eq!(sim.position(), 1);
        assert_eq!(sim.current().show(&aut), "{q0, q1}");
        assert!(sim.step_back());
        assert!(!sim.step_back());
        assert_eq!(sim.position(), 0);
        assert_eq!(sim.history().count(), 1);
    }

    #[cfg(feature = "random")]
    #[test]
    fn step_back_restores_earlier_configuration() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..30 {
            let aut = crate::random::generate_random_automaton(&mut rng, 2, 5, 0.3, 0.2);
            let word = crate::random::generate_random_word(&mut rng, aut.alphabet(), 8);
            let mut sim = Simulator::new(&aut);
            sim.set_up(&word);
            while !sim.is_exhausted() {
                let before = sim.current().clone();
                sim.step_forward();
                sim.step_back();
                assert_eq!(sim.current(), &before);
                sim.step_forward();
            }
        }
    }

    #[test]
    fn dead_branches_stay_dead() {
        let aut = ends_in_one();
        let mut sim = Simulator::new(&aut);
        sim.set_up("2011");
        assert!(sim.step_forward());
        assert!(sim.current().is_empty());
        while sim.step_forward() {
            assert!(sim.current().is_empty());
        }
        assert_eq!(sim.position(), 4);
    }

    #[test]
    fn no_start_state_gives_empty_configuration() {
        let mut aut = ends_in_one();
        aut.clear_start();
        let mut sim = Simulator::new(&aut);
        sim.set_up("1");
        assert!(sim.current().is_empty());
        assert!(sim.step_forward());
        assert!(!sim.is_accepting());
    }

    #[test]
    fn subscribers_see_every_configuration() {
        let aut = ends_in_one();
        let seen = RefCell::new(vec![]);
        let mut sim = Simulator::new(&aut);
        sim.subscribe(|e| {
            if let Event::ConfigurationChanged {
                position,
                configuration,
            } = e
            {
                seen.borrow_mut().push((*position, configuration.len()));
            }
        });
        sim.set_up("11");
        sim.step_forward();
        sim.step_forward();
        sim.step_back();
        drop(sim);
        assert_eq!(seen.into_inner(), vec![(0, 1), (1, 2), (2, 2), (1, 2)]);
    }
}
