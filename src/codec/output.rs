use std::fmt::{Display, Result, Write};

use itertools::Itertools;
use tracing::trace;

use crate::Automaton;

/// Wraps an automaton such that its [`Display`] implementation produces the text encoding.
#[derive(Clone, Copy, Debug)]
pub struct Encoded<'a>(&'a Automaton);

impl Display for Encoded<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        self.0.write_text(f)
    }
}

fn write_quoted<W: Write>(w: &mut W, name: &str) -> Result {
    w.write_char('"')?;
    for c in name.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('"')
}

impl Automaton {
    /// Writes the text encoding of `self` to `w`: the alphabet, every state, every transition
    /// and finally the start state, followed by `--END--`.
    pub fn write_text<W: Write>(&self, w: &mut W) -> Result {
        writeln!(w, "Alphabet: {}", self.alphabet())?;

        for (_, q) in self.states() {
            w.write_str("State: ")?;
            write_quoted(w, q.name())?;
            if q.is_accepting() {
                w.write_str(" accepting")?;
            }
            w.write_char('\n')?;
        }

        for (_, t) in self.transitions() {
            w.write_str("Transition: ")?;
            write_quoted(w, self.state_name(t.source()).unwrap_or_default())?;
            w.write_str(" -> ")?;
            write_quoted(w, self.state_name(t.target()).unwrap_or_default())?;
            writeln!(w, " [{}]", t.labels().iter().join(","))?;
        }

        if let Some(start) = self.start_state() {
            w.write_str("Start: ")?;
            write_quoted(w, start.name())?;
            w.write_char('\n')?;
        }

        w.write_str("--END--\n")
    }

    /// Returns a value that displays as the text encoding of `self`.
    pub fn encoded(&self) -> Encoded<'_> {
        Encoded(self)
    }

    /// Produces the text encoding as a string.
    pub fn to_text(&self) -> String {
        let text = self.encoded().to_string();
        trace!("encoded automaton\n{}", text);
        text
    }

    /// Writes the text encoding to the file at `path`.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn writes_records_in_schema_order() {
        let mut aut = Automaton::for_alphabet(Alphabet::parse("0,1").unwrap());
        let q0 = aut.add_state("q0").unwrap();
        let q1 = aut.add_state("say \"hi\"").unwrap();
        aut.set_accepting(q1, true).unwrap();
        aut.add_transition(q0, q1, '1').unwrap();
        aut.add_transition(q1, q1, '1').unwrap();
        aut.add_transition(q1, q1, '0').unwrap();
        aut.add_transition(q0, q0, Label::Epsilon).unwrap();

        assert_eq!(
            aut.to_text(),
            "Alphabet: 0,1\n\
             State: \"q0\"\n\
             State: \"say \\\"hi\\\"\" accepting\n\
             Transition: \"q0\" -> \"say \\\"hi\\\"\" [1]\n\
             Transition: \"say \\\"hi\\\"\" -> \"say \\\"hi\\\"\" [0,1]\n\
             Transition: \"q0\" -> \"q0\" [ε]\n\
             Start: \"q0\"\n\
             --END--\n"
        );
    }

    #[test]
    fn start_is_omitted_when_absent() {
        let mut aut = Automaton::new();
        aut.add_state("only").unwrap();
        aut.clear_start();
        assert_eq!(aut.to_text(), "Alphabet: \nState: \"only\"\n--END--\n");
    }
}
