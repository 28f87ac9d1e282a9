use itertools::Itertools;

use crate::{alphabet::Label, automaton::StateId, Automaton};

impl Automaton {
    /// Decorated name of a state as it appears in the first column of the transition table:
    /// the start state is prefixed with `→`, accepting states with `*`.
    fn table_row_header(&self, id: StateId) -> String {
        let Some(q) = self.state(id) else {
            return String::new();
        };
        format!(
            "{}{}{}",
            if self.start() == Some(id) { "→" } else { "" },
            if q.is_accepting() { "*" } else { "" },
            q.name()
        )
    }

    /// Computes the cells of the transition table. The first row is the header consisting of
    /// `State`, every symbol of the alphabet and ε. Then there is one row per state, whose cells
    /// list the names of all targets reachable through the respective label, or `-` if there are
    /// none.
    pub fn transition_rows(&self) -> Vec<Vec<String>> {
        let labels = self.alphabet().labels().collect_vec();
        let header: Vec<String> = std::iter::once("State".to_string())
            .chain(labels.iter().map(Label::to_string))
            .collect();

        std::iter::once(header)
            .chain(self.state_ids().map(|q| {
                std::iter::once(self.table_row_header(q))
                    .chain(labels.iter().map(|label| {
                        let targets = self
                            .transitions_from(q)
                            .filter(|(_, t)| t.has_label(label))
                            .filter_map(|(_, t)| self.state_name(t.target()))
                            .sorted()
                            .join(", ");
                        if targets.is_empty() {
                            "-".to_string()
                        } else {
                            targets
                        }
                    }))
                    .collect::<Vec<_>>()
            }))
            .collect()
    }

    /// Renders the transition table using [`tabled`].
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        for row in self.transition_rows() {
            builder.push_record(row);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn rows_list_all_targets() {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("a,b").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("q1").unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut.add_transition(q0, q0, 'a').unwrap();
        aut.add_transition(q0, q1, 'a').unwrap();
        aut.add_transition(q1, q0, Label::Epsilon).unwrap();

        let rows = aut.transition_rows();
        assert_eq!(rows[0], vec!["State", "a", "b", "ε"]);
        assert_eq!(rows[1], vec!["→q0", "q0, q1", "-", "-"]);
        assert_eq!(rows[2], vec!["*q1", "-", "-", "q0"]);

        let table = aut.transition_table();
        assert!(table.contains("q0, q1"));
        assert!(table.contains("→q0"));
    }

    #[test]
    fn empty_automaton_has_header_only() {
        let aut = Automaton::new();
        assert_eq!(aut.transition_rows(), vec![vec!["State", "ε"]]);
    }
}
