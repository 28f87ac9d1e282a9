use std::{io::BufRead, str::FromStr};

use tracing::{trace, warn};

use crate::{alphabet::Label, Alphabet, Automaton, LoadError, ValidationError};

/// The kinds of records, in the order in which they have to appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Record {
    Alphabet,
    State,
    Transition,
    Start,
}

impl Record {
    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "Alphabet" => Record::Alphabet,
            "State" => Record::State,
            "Transition" => Record::Transition,
            "Start" => Record::Start,
            _ => return None,
        })
    }

    /// Whether a record of kind `self` may follow one of kind `last`.
    fn may_follow(self, last: Option<Record>) -> bool {
        match (last, self) {
            (None, Record::Alphabet) => true,
            (None, _) | (Some(_), Record::Alphabet) => false,
            (Some(Record::Start), Record::Start) => false,
            (Some(last), this) => last <= this,
        }
    }
}

/// Reads the text encoding a line at a time and rebuilds the automaton on the fly.
#[derive(Debug, Default)]
struct Loader {
    automaton: Automaton,
    last: Option<Record>,
    line: usize,
    start: Option<String>,
}

impl Loader {
    fn syntax<M: Into<String>>(&self, message: M) -> LoadError {
        LoadError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn invalid(&self, source: ValidationError) -> LoadError {
        LoadError::Validation {
            line: self.line,
            source,
        }
    }

    fn resolve(&self, name: String) -> Result<crate::automaton::StateId, LoadError> {
        self.automaton
            .state_id(&name)
            .ok_or(LoadError::StructuralInconsistency {
                line: self.line,
                name,
            })
    }

    /// Processes one line, returning the finished automaton once `--END--` is reached.
    fn feed(&mut self, raw: &str) -> Result<Option<Automaton>, LoadError> {
        self.line += 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if line == "--END--" {
            return self.finish().map(Some);
        }

        let (key, rest) = line
            .split_once(':')
            .ok_or_else(|| self.syntax("expected a record of the form `Key: value`"))?;
        let record = Record::from_key(key.trim())
            .ok_or_else(|| self.syntax(format!("unknown record `{}`", key.trim())))?;
        if !record.may_follow(self.last) {
            return Err(self.syntax(format!("{record:?} record is out of order")));
        }
        self.last = Some(record);

        let rest = rest.trim();
        match record {
            Record::Alphabet => {
                let alphabet = Alphabet::parse(rest).map_err(|e| self.invalid(e))?;
                self.automaton.set_alphabet(alphabet);
            }
            Record::State => {
                let (name, flags) = unquote(rest).map_err(|m| self.syntax(m))?;
                let accepting = match flags.trim() {
                    "" => false,
                    "accepting" => true,
                    other => return Err(self.syntax(format!("unknown state flag `{other}`"))),
                };
                let id = self.automaton.add_state(name).map_err(|e| self.invalid(e))?;
                if accepting {
                    self.automaton
                        .set_accepting(id, true)
                        .map_err(|e| self.invalid(e))?;
                }
            }
            Record::Transition => {
                let (source, rest) = unquote(rest).map_err(|m| self.syntax(m))?;
                let rest = rest
                    .trim_start()
                    .strip_prefix("->")
                    .ok_or_else(|| self.syntax("expected `->` after the source state"))?;
                let (target, rest) = unquote(rest).map_err(|m| self.syntax(m))?;
                let labels = rest
                    .trim()
                    .strip_prefix('[')
                    .and_then(|l| l.strip_suffix(']'))
                    .ok_or_else(|| self.syntax("expected a bracketed list of labels"))?;
                let labels = labels
                    .split(',')
                    .map(Label::from_str)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| self.invalid(e))?;

                let from = self.resolve(source)?;
                let to = self.resolve(target)?;
                for label in labels {
                    self.automaton
                        .add_transition(from, to, label)
                        .map_err(|e| self.invalid(e))?;
                }
            }
            Record::Start => {
                let (name, rest) = unquote(rest).map_err(|m| self.syntax(m))?;
                if !rest.trim().is_empty() {
                    return Err(self.syntax("unexpected input after the start state"));
                }
                self.start = Some(name);
            }
        }
        Ok(None)
    }

    fn finish(&mut self) -> Result<Automaton, LoadError> {
        if self.last.is_none() {
            return Err(self.syntax("missing Alphabet record"));
        }
        let mut automaton = std::mem::take(&mut self.automaton);
        // adding the first state implicitly made it the start state
        automaton.clear_start();
        if let Some(name) = self.start.take() {
            match automaton.state_id(&name) {
                Some(id) => automaton.set_start(id).map_err(|e| self.invalid(e))?,
                None => warn!("start state \"{name}\" does not exist, loading without start"),
            }
        }
        trace!("loaded automaton with {} states", automaton.size());
        Ok(automaton)
    }
}

/// Splits a quoted name off the front of `input` and returns it unescaped, together with
/// whatever follows the closing quote.
fn unquote(input: &str) -> Result<(String, &str), String> {
    let input = input.trim_start();
    let mut chars = input.char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return Err("expected a quoted state name".to_string());
    }

    let mut name = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((name, &input[i + 1..])),
            '\\' => match chars.next() {
                Some((_, 'n')) => name.push('\n'),
                Some((_, c @ ('"' | '\\'))) => name.push(c),
                Some((_, c)) => return Err(format!("invalid escape sequence `\\{c}`")),
                None => break,
            },
            c => name.push(c),
        }
    }
    Err("unterminated state name".to_string())
}

impl Automaton {
    /// Rebuilds an automaton from its text encoding, as produced by [`Automaton::to_text`].
    /// Anything after the first `--END--` is ignored.
    ///
    /// The load is all or nothing: the first malformed or inconsistent record aborts it. The
    /// only exception is a start record naming a state that does not exist, in which case the
    /// automaton is loaded without a start state.
    pub fn from_text(text: &str) -> Result<Self, LoadError> {
        let mut loader = Loader::default();
        for line in text.lines() {
            if let Some(automaton) = loader.feed(line)? {
                return Ok(automaton);
            }
        }
        Err(LoadError::MissingEnd)
    }

    /// Works like [`Automaton::from_text`] but reads lines from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut loader = Loader::default();
        for line in reader.lines() {
            if let Some(automaton) = loader.feed(&line?)? {
                return Ok(automaton);
            }
        }
        Err(LoadError::MissingEnd)
    }

    /// Loads the automaton stored in the file at `path`.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl FromStr for Automaton {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
