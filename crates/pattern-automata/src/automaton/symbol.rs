//! Symbol types for automata transitions.

use std::fmt;

/// The label of an NFA transition: either a free move or an input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A free move, taken without reading any input.
    Epsilon,
    /// A move that consumes exactly this character.
    Char(char),
}

impl Symbol {
    /// Check if this is an epsilon (free) move.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The consumed character, if any.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}
