use thiserror::Error;

/// Errors from parsing patterns and from building rulebooks by hand.
///
/// Positions are byte offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unexpected {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("parenthesis opened at position {position} is never closed")]
    UnclosedParenthesis { position: usize },

    #[error("conflicting rules for state {state} on {symbol:?}")]
    ConflictingRule { state: String, symbol: char },
}

pub type Result<T> = std::result::Result<T, Error>;
