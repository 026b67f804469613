//! Regular-expression matching by way of finite automata.
//!
//! A [`Pattern`] compiles to a Thompson NFA ([`NfaDesign`]), which subset
//! construction turns into an equivalent DFA ([`DfaDesign`]). Either one can
//! decide whether a whole input string matches:
//!
//! ```
//! use pattern_automata::Pattern;
//!
//! let pattern: Pattern = "(ab|12)*".parse()?;
//! assert!(pattern.matches("ab12ab"));
//! assert!(pattern.matches_via_dfa("ab12ab"));
//! assert!(!pattern.matches_via_dfa("ab1"));
//! # Ok::<(), pattern_automata::Error>(())
//! ```

pub mod automaton;
mod error;
mod matcher;
pub mod pattern;

pub use automaton::{
    Dfa, DfaDesign, DfaRule, DfaRulebook, Nfa, NfaDesign, NfaRule, NfaRulebook, NfaSimulation,
    StateId, StateSet, Symbol,
};
pub use error::{Error, Result};
pub use matcher::{Config, Engine, Matcher};
pub use pattern::Pattern;
