use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::ValidationError;

/// A single input symbol. Words are consumed one `char` at a time.
pub type Symbol = char;

/// The character used to display and encode the ε pseudo-symbol.
pub const EPSILON: char = 'ε';

/// The label of a transition. Besides ordinary symbols, a transition may be labeled with ε,
/// which is taken without consuming any input. ε is always permitted, independent of the
/// [`Alphabet`].
///
/// Labels are ordered with ε first, followed by the symbols in their natural order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// The ε pseudo-symbol.
    Epsilon,
    /// An ordinary symbol, which should be part of the alphabet.
    Symbol(Symbol),
}

impl Label {
    /// Returns true if `self` is ε.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Returns the underlying symbol, or `None` for ε.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(sym) => Some(*sym),
        }
    }

    /// Returns true if this label is taken when reading `sym`. ε never matches an input symbol.
    pub fn matches(&self, sym: Symbol) -> bool {
        self.symbol() == Some(sym)
    }
}

impl From<Symbol> for Label {
    fn from(value: Symbol) -> Self {
        if value == EPSILON {
            Label::Epsilon
        } else {
            Label::Symbol(value)
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Epsilon => write!(f, "{EPSILON}"),
            Label::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}

impl FromStr for Label {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        single_char(s.trim()).map(Label::from)
    }
}

fn single_char(s: &str) -> Result<char, ValidationError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ValidationError::MalformedSymbol(s.to_string())),
    }
}

/// The set of symbols an automaton operates on. It never contains ε.
///
/// An alphabet is usually entered as a comma separated list, see [`Alphabet::parse`]:
/// ```
/// use automata_sim::prelude::*;
///
/// let alphabet = Alphabet::parse(" a, b ,, a").unwrap();
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.to_string(), "a,b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alphabet(BTreeSet<Symbol>);

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the alphabet consisting of the first `size` lowercase latin letters.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        (0..size).map(|i| (b'a' + i as u8) as char).collect()
    }

    /// Parses a comma separated list of symbols. Entries are trimmed, empty entries and ε are
    /// skipped and duplicates collapse. Every remaining entry has to be a single character.
    pub fn parse(list: &str) -> Result<Self, ValidationError> {
        let mut symbols = BTreeSet::new();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let sym = single_char(entry)?;
            if sym != EPSILON {
                symbols.insert(sym);
            }
        }
        Ok(Self(symbols))
    }

    /// Returns true if `sym` is a symbol of this alphabet.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.0.contains(&sym)
    }

    /// Returns true if a transition may carry `label`, i.e. it is ε or one of our symbols.
    pub fn permits(&self, label: &Label) -> bool {
        match label {
            Label::Epsilon => true,
            Label::Symbol(sym) => self.contains(*sym),
        }
    }

    /// Iterates over the symbols in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().copied()
    }

    /// Iterates over every label a transition may carry: the symbols followed by ε.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.universe()
            .map(Label::Symbol)
            .chain(std::iter::once(Label::Epsilon))
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().filter(|&sym| sym != EPSILON).collect())
    }
}

impl FromStr for Alphabet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_skips() {
        let alphabet = Alphabet::parse("1 , 0,,0, ε ").unwrap();
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['0', '1']);
        assert!(!alphabet.contains(EPSILON));
        assert!(Alphabet::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_words() {
        assert_eq!(
            Alphabet::parse("a,bc"),
            Err(ValidationError::MalformedSymbol("bc".into()))
        );
    }

    #[test]
    fn labels() {
        assert_eq!("ε".parse::<Label>(), Ok(Label::Epsilon));
        assert_eq!(" x".parse::<Label>(), Ok(Label::Symbol('x')));
        assert!("xy".parse::<Label>().is_err());
        assert!(Label::Epsilon < Label::Symbol('a'));
        assert!(!Label::Epsilon.matches(EPSILON));

        let alphabet = Alphabet::of_size(2);
        assert!(alphabet.permits(&Label::Epsilon));
        assert!(alphabet.permits(&Label::Symbol('b')));
        assert!(!alphabet.permits(&Label::Symbol('c')));
        assert_eq!(alphabet.labels().last(), Some(Label::Epsilon));
    }
}
