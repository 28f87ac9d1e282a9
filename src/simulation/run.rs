use tracing::debug;

use crate::{automaton::Event, Automaton};

use super::{Configuration, Simulator};

/// Outcome of evaluating a whole word, see [`Simulator::evaluate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether the word is accepted.
    pub accepted: bool,
    /// Number of symbols that were consumed before the run either finished or died.
    pub consumed: usize,
    /// The configuration the run ended in.
    pub configuration: Configuration,
}

impl RunOutcome {
    /// Returns true if the run ended in the empty configuration.
    pub fn died(&self) -> bool {
        self.configuration.is_empty()
    }
}

impl Simulator<'_> {
    /// Runs `word` to completion and returns whether it is accepted, that is whether the final
    /// configuration contains an accepting state. Stepping stops early once the configuration
    /// becomes empty, as it can never recover from that.
    ///
    /// The history built along the way is discarded afterwards, so a run does not interfere
    /// with interactive stepping: the simulator is left at position 0 of `word`.
    pub fn run(&mut self, word: &str) -> bool {
        self.evaluate(word).accepted
    }

    /// Works like [`Simulator::run`] but also reports how far the run got and where it ended.
    pub fn evaluate(&mut self, word: &str) -> RunOutcome {
        self.set_up(word);
        while !self.is_exhausted() && !self.current().is_empty() {
            self.step_forward();
        }

        let outcome = RunOutcome {
            accepted: self.is_accepting(),
            consumed: self.position(),
            configuration: self.current().clone(),
        };
        self.discard_history();
        debug!(
            "\"{word}\" is {} after {} symbols",
            if outcome.accepted { "accepted" } else { "rejected" },
            outcome.consumed
        );
        self.emit(Event::RunCompleted {
            word: word.to_string(),
            accepted: outcome.accepted,
        });
        outcome
    }
}

impl Automaton {
    /// Returns true if `word` is accepted, using a throw-away [`Simulator`].
    pub fn accepts(&self, word: &str) -> bool {
        Simulator::new(self).run(word)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::prelude::*;

    fn ends_with_one() -> Automaton {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("0,1").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut.add_transition(q0, q1, '1').unwrap();
        aut.add_transition(q1, q1, '0').unwrap();
        aut.add_transition(q1, q1, '1').unwrap();
        aut.add_transition(q0, q0, '0').unwrap();
        aut
    }

    #[test_log::test]
    fn accepts_words_containing_one() {
        let aut = ends_with_one();
        assert!(aut.accepts("1011"));
        assert!(aut.accepts("0001"));
        assert!(!aut.accepts("0"));
        assert!(!aut.accepts(""));
        assert!(!aut.accepts("00a1"));
    }

    #[test]
    fn epsilon_into_accepting_accepts_empty_word() {
        let mut aut = Automaton::new();
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut.add_transition(q0, q1, Label::Epsilon).unwrap();
        assert!(aut.accepts(""));
        assert!(!aut.accepts("a"));
    }

    #[test]
    fn without_start_nothing_is_accepted() {
        let mut aut = ends_with_one();
        aut.clear_start();
        assert!(!aut.accepts("1"));
        assert!(!aut.accepts(""));
    }

    #[test]
    fn evaluation_stops_on_dead_configuration() {
        let aut = ends_with_one();
        let mut sim = Simulator::new(&aut);
        let outcome = sim.evaluate("0x0101");
        assert!(!outcome.accepted);
        assert!(outcome.died());
        assert_eq!(outcome.consumed, 2);
        assert_eq!(sim.position(), 0);
        assert_eq!(sim.word().len(), 6);
    }

    #[test]
    fn run_reports_completion() {
        let aut = ends_with_one();
        let results = RefCell::new(vec![]);
        let mut sim = Simulator::new(&aut);
        sim.subscribe(|e| {
            if let Event::RunCompleted { word, accepted } = e {
                results.borrow_mut().push((word.clone(), *accepted));
            }
        });
        assert!(sim.run("01"));
        assert!(!sim.run("00"));
        drop(sim);
        assert_eq!(
            results.into_inner(),
            vec![("01".to_string(), true), ("00".to_string(), false)]
        );
    }

    #[cfg(feature = "random")]
    #[test]
    fn run_agrees_with_manual_stepping() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..100 {
            let aut = crate::random::generate_random_automaton(&mut rng, 2, 6, 0.25, 0.15);
            let mut sim = Simulator::new(&aut);
            for _ in 0..10 {
                let word = crate::random::generate_random_word(&mut rng, aut.alphabet(), 10);
                sim.set_up(&word);
                while sim.step_forward() {}
                let manual = sim.is_accepting();
                assert_eq!(sim.run(&word), manual, "disagreement on {word} for {aut:?}");
            }
        }
    }
}
