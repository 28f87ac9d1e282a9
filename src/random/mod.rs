use itertools::Itertools;
use tracing::debug;

use crate::prelude::*;

/// Generates a random automaton with `size` states named `q0`, `q1`, ... over the alphabet of
/// the first `symbols` lowercase letters. The first state is the start state. The algorithm is
/// as follows:
/// 1. Add all states, each of them is accepting with probability one half.
/// 2. For each pair of states `(p, q)` and each symbol, insert a transition from `p` to `q` on
///    that symbol with probability `density`.
/// 3. For each pair of states `(p, q)`, insert an ε-transition with probability
///    `epsilon_probability`.
///
/// The result is usually nondeterministic and incomplete, which makes it useful for testing
/// the simulation.
pub fn generate_random_automaton(
    rng: &mut fastrand::Rng,
    symbols: usize,
    size: usize,
    density: f64,
    epsilon_probability: f64,
) -> Automaton {
    let mut aut = Automaton::for_alphabet(Alphabet::of_size(symbols));
    let states = (0..size)
        .map(|i| aut.insert_state(format!("q{i}")))
        .collect_vec();

    for &q in &states {
        if rng.bool() {
            aut.set_accepting(q, true)
                .expect("state was added right before");
        }
    }

    let universe = aut.alphabet().universe().collect_vec();
    for (&p, &q) in states.iter().cartesian_product(states.iter()) {
        for &sym in &universe {
            if rng.f64() < density {
                aut.link(p, q, Label::Symbol(sym));
            }
        }
        if rng.f64() < epsilon_probability {
            aut.link(p, q, Label::Epsilon);
        }
    }

    debug!(
        "generated random automaton with {} states and {} transitions",
        aut.size(),
        aut.transition_count()
    );
    aut
}

/// Draws a word of length at most `max_len` over `alphabet`, with the length chosen uniformly.
/// The word is empty if the alphabet is.
pub fn generate_random_word(rng: &mut fastrand::Rng, alphabet: &Alphabet, max_len: usize) -> String {
    let symbols = alphabet.universe().collect_vec();
    if symbols.is_empty() {
        return String::new();
    }
    (0..rng.usize(..=max_len))
        .map(|_| symbols[rng.usize(..symbols.len())])
        .collect()
}
