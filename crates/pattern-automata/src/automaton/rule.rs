//! Labeled transitions shared by the nondeterministic and deterministic
//! rulebooks.

use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use std::fmt;

/// A single transition `state --symbol--> next_state`.
///
/// Rules are plain values: two rules are equal when all three fields are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaRule<S, A = Symbol> {
    pub state: S,
    pub symbol: A,
    pub next_state: S,
}

/// A rule of a nondeterministic rulebook; the symbol may be epsilon.
pub type NfaRule = FaRule<StateId, Symbol>;

/// A rule of a deterministic rulebook; always consumes a character.
pub type DfaRule<S> = FaRule<S, char>;

impl<S, A> FaRule<S, A> {
    /// Create a new rule moving from `state` to `next_state` on `symbol`.
    pub fn new(state: S, symbol: impl Into<A>, next_state: S) -> Self {
        Self {
            state,
            symbol: symbol.into(),
            next_state,
        }
    }

    /// The state this rule leads to.
    pub fn follow(&self) -> &S {
        &self.next_state
    }
}

impl<S: PartialEq, A: PartialEq> FaRule<S, A> {
    /// Check if this rule fires in `state` on `symbol`.
    pub fn applies_to(&self, state: &S, symbol: &A) -> bool {
        self.state == *state && self.symbol == *symbol
    }
}

impl NfaRule {
    /// A free move from `state` to `next_state`.
    pub fn epsilon(state: StateId, next_state: StateId) -> Self {
        Self::new(state, Symbol::Epsilon, next_state)
    }
}

impl<S: fmt::Display, A: fmt::Display> fmt::Display for FaRule<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.state, self.symbol, self.next_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::state::StateSet;

    #[test]
    fn test_applies_to() {
        let rule = NfaRule::new(1, 'a', 2);
        assert!(rule.applies_to(&1, &Symbol::Char('a')));
        assert!(!rule.applies_to(&1, &Symbol::Char('b')));
        assert!(!rule.applies_to(&2, &Symbol::Char('a')));
        assert!(!rule.applies_to(&1, &Symbol::Epsilon));
        assert_eq!(*rule.follow(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(NfaRule::new(1, 'a', 2).to_string(), "1 --a--> 2");
        assert_eq!(NfaRule::epsilon(4, 2).to_string(), "4 --ε--> 2");
        let rule = DfaRule::new(StateSet::from([1, 2]), 'b', StateSet::new());
        assert_eq!(rule.to_string(), "{1, 2} --b--> {}");
    }
}
