use tracing::trace;

use crate::{alphabet::Symbol, automaton::StateId, Automaton};

use super::Configuration;

impl Automaton {
    /// Computes the ε-closure of `state`, which is the set of states reachable from it through
    /// zero or more ε-transitions, `state` itself included. The closure of `None`, or of a state
    /// that does not exist, is empty.
    pub fn epsilon_closure(&self, state: Option<StateId>) -> Configuration {
        self.epsilon_closure_of(state)
    }

    /// Computes the union of the ε-closures of all given states.
    pub fn epsilon_closure_of<I: IntoIterator<Item = StateId>>(&self, states: I) -> Configuration {
        let mut closure = Configuration::empty();
        let mut stack = vec![];
        for origin in states {
            if self.contains_state(origin) && closure.insert(origin) {
                stack.push(origin);
            }
        }

        while let Some(q) = stack.pop() {
            for (_, t) in self.transitions_from(q) {
                if t.is_epsilon() && closure.insert(t.target()) {
                    stack.push(t.target());
                }
            }
        }
        closure
    }

    /// Consumes `sym` from every state of `configuration` and returns the ε-closed set of
    /// states that is reached. A symbol without matching transitions leads to the empty
    /// configuration.
    pub fn successor_configuration(&self, configuration: &Configuration, sym: Symbol) -> Configuration {
        let destinations = configuration
            .iter()
            .flat_map(|q| self.transitions_from(q))
            .filter(|(_, t)| t.matches(sym))
            .map(|(_, t)| t.target());
        let next = self.epsilon_closure_of(destinations);
        trace!(
            "reading {sym} in {} leads to {}",
            configuration.show(self),
            next.show(self)
        );
        next
    }
}
