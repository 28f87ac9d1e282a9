//! Export to the graphviz DOT format. For more information on the format, see the
//! [graphviz documentation](https://graphviz.org/doc/info/lang.html).

use std::fmt::Display;

use itertools::Itertools;

use crate::{automaton::StateId, simulation::Configuration, Automaton};

/// An attribute of a node in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The color of a node
    Color(String),
    /// The style of a node
    Style(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", escape(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
            DotStateAttribute::Color(c) => write!(f, "color=\"{c}\""),
            DotStateAttribute::Style(s) => write!(f, "style=\"{s}\""),
        }
    }
}

/// An attribute of an edge in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{}\"", escape(lbl)),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

// state names are arbitrary, so nodes are identified by their handle
fn ident(id: StateId) -> String {
    format!("s{}", id.index())
}

impl Automaton {
    fn dot_state_attributes(
        &self,
        id: StateId,
        highlight: Option<&Configuration>,
    ) -> Vec<DotStateAttribute> {
        let Some(q) = self.state(id) else {
            return vec![];
        };
        let shape = if q.is_accepting() {
            "doublecircle"
        } else {
            "circle"
        };
        let mut attributes = vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(q.name().to_string()),
        ];
        if highlight.is_some_and(|c| c.contains(id)) {
            attributes.push(DotStateAttribute::Style("filled".into()));
            attributes.push(DotStateAttribute::Color("lightblue".into()));
        }
        attributes
    }

    /// Compute the graphviz representation of the automaton. The start state is marked by an
    /// arrow coming from an invisible node.
    pub fn dot_representation(&self) -> String {
        self.dot_representation_highlighting(None)
    }

    /// Works like [`Automaton::dot_representation`], but fills the states of `configuration`,
    /// which is useful for showing the progress of a simulation.
    pub fn dot_representation_highlighting(&self, configuration: Option<&Configuration>) -> String {
        let header = ["digraph NFA {".to_string(), "rankdir=LR".to_string()];

        let start = self.start().map(|q| {
            format!(
                "init [label=\"\", shape=none, width=0, height=0]\ninit -> {}",
                ident(q)
            )
        });

        let states = self.state_ids().map(|q| {
            format!(
                "{} [{}]",
                ident(q),
                self.dot_state_attributes(q, configuration)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self.transitions().map(|(_, t)| {
            format!(
                "{} -> {} [{}]",
                ident(t.source()),
                ident(t.target()),
                DotTransitionAttribute::Label(t.label_text())
            )
        });

        header
            .into_iter()
            .chain(states)
            .chain(start)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Renders the automaton as PNG by piping its DOT representation through the `dot`
    /// executable, which has to be installed. Returns the bytes of the image.
    #[cfg(feature = "graphviz")]
    pub fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        use std::io::{Read, Write};

        use tracing::trace;
        let dot = self.dot_representation();
        trace!("writing dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let mut output = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_end(&mut output)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "dot process exited with status: {status}"
            )));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn dot_output() {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("a,b").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("say \"q1\"").unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut.add_transition(q0, q1, 'a').unwrap();
        aut.add_transition(q0, q1, 'b').unwrap();
        aut.add_transition(q1, q1, Label::Epsilon).unwrap();

        let dot = aut.dot_representation();
        assert!(dot.starts_with("digraph NFA {"));
        assert!(dot.contains("s0 [shape=\"circle\", label=\"q0\"]"));
        assert!(dot.contains("s1 [shape=\"doublecircle\", label=\"say \\\"q1\\\"\"]"));
        assert!(dot.contains("init -> s0"));
        assert!(dot.contains("s0 -> s1 [label=\"a, b\"]"));
        assert!(dot.contains("s1 -> s1 [label=\"ε\"]"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn highlights_configuration() {
        let mut aut = Automaton::new();
        let q = aut.add_state("q").unwrap();
        let dot = aut.dot_representation_highlighting(Some(&aut.epsilon_closure(Some(q))));
        assert!(dot.contains("style=\"filled\""));
        aut.clear_start();
        assert!(!aut.dot_representation().contains("init"));
    }
}
