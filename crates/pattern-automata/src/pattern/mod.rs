//! Regular-expression syntax trees.
//!
//! A [`Pattern`] only knows literal characters, concatenation, alternation
//! and the Kleene star. It renders itself back to the shortest correctly
//! parenthesized text and compiles itself to an [`NfaDesign`].

mod compile;
mod parse;

use crate::automaton::{DfaDesign, NfaDesign, StateSet};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches only the empty string.
    Empty,
    /// Matches exactly one character.
    Literal(char),
    Concatenate(Box<Pattern>, Box<Pattern>),
    Choose(Box<Pattern>, Box<Pattern>),
    /// Zero or more repetitions.
    Repeat(Box<Pattern>),
}

impl Pattern {
    /// A pattern matching exactly the character `c`.
    pub fn literal(c: char) -> Self {
        Pattern::Literal(c)
    }

    /// A pattern matching `first` followed by `second`.
    pub fn concatenate(first: Pattern, second: Pattern) -> Self {
        Pattern::Concatenate(Box::new(first), Box::new(second))
    }

    /// A pattern matching either `first` or `second`.
    pub fn choose(first: Pattern, second: Pattern) -> Self {
        Pattern::Choose(Box::new(first), Box::new(second))
    }

    /// A pattern matching zero or more repetitions of `pattern`.
    pub fn repeat(pattern: Pattern) -> Self {
        Pattern::Repeat(Box::new(pattern))
    }

    /// A pattern matching exactly `s`: a left-nested concatenation of its
    /// characters, or [`Pattern::Empty`] for `""`.
    pub fn string(s: &str) -> Self {
        s.chars()
            .map(Pattern::Literal)
            .reduce(Pattern::concatenate)
            .unwrap_or(Pattern::Empty)
    }

    /// Parse the restricted syntax (literals, `|`, `*` and parentheses).
    pub fn parse(text: &str) -> Result<Self> {
        parse::parse(text)
    }

    /// How tightly this node binds when rendered. Lower values need
    /// parentheses inside higher ones.
    pub fn precedence(&self) -> u8 {
        match self {
            Pattern::Choose(..) => 0,
            Pattern::Concatenate(..) => 1,
            Pattern::Repeat(_) => 2,
            Pattern::Empty | Pattern::Literal(_) => 3,
        }
    }

    /// Render this pattern for a context of precedence `outer_precedence`,
    /// adding parentheses only when needed.
    pub fn bracket(&self, outer_precedence: u8) -> String {
        if self.precedence() < outer_precedence {
            format!("({self})")
        } else {
            self.to_string()
        }
    }

    /// The regex text for this pattern.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Compile to a Thompson NFA. Every call allocates a fresh set of states.
    pub fn to_nfa_design(&self) -> NfaDesign {
        compile::Compiler::new().compile(self)
    }

    /// Compile to an NFA and convert it with subset construction.
    pub fn to_dfa_design(&self) -> DfaDesign<StateSet> {
        self.to_nfa_design().to_dfa_design()
    }

    /// Check if the whole of `input` matches, simulating the NFA.
    pub fn matches(&self, input: &str) -> bool {
        self.to_nfa_design().accepts(input)
    }

    /// Check if the whole of `input` matches, simulating the equivalent DFA.
    pub fn matches_via_dfa(&self, input: &str) -> bool {
        self.to_dfa_design().accepts(input)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precedence = self.precedence();
        match self {
            Pattern::Empty => Ok(()),
            Pattern::Literal(c) => write!(f, "{c}"),
            Pattern::Concatenate(first, second) => write!(
                f,
                "{}{}",
                first.bracket(precedence),
                second.bracket(precedence)
            ),
            Pattern::Choose(first, second) => write!(
                f,
                "{}|{}",
                first.bracket(precedence),
                second.bracket(precedence)
            ),
            // A bare `*` would not parse back.
            Pattern::Repeat(pattern) if **pattern == Pattern::Empty => f.write_str("()*"),
            Pattern::Repeat(pattern) => write!(f, "{}*", pattern.bracket(precedence)),
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}
