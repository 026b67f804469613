//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::rule::DfaRule;
use crate::automaton::state::StateSet;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

/// A rulebook with at most one rule per `(state, character)` pair.
#[derive(Debug, Clone)]
pub struct DfaRulebook<S = StateSet> {
    rules: Vec<DfaRule<S>>,
    /// source -> character -> position in `rules`
    transitions: HashMap<S, HashMap<char, usize>>,
}

impl<S: Clone + Eq + Hash + fmt::Debug> DfaRulebook<S> {
    /// Build a rulebook, rejecting rules that would make it nondeterministic.
    /// Exact duplicates are collapsed.
    pub fn new(rules: impl IntoIterator<Item = DfaRule<S>>) -> Result<Self> {
        let mut rulebook = Self::empty();
        for rule in rules {
            if let Some(existing) = rulebook.rule_for(&rule.state, rule.symbol) {
                if existing.next_state != rule.next_state {
                    return Err(Error::ConflictingRule {
                        state: format!("{:?}", rule.state),
                        symbol: rule.symbol,
                    });
                }
                continue;
            }
            rulebook.push(rule);
        }
        Ok(rulebook)
    }

    /// Build a rulebook from rules already known to be deterministic.
    pub(crate) fn from_deterministic(rules: impl IntoIterator<Item = DfaRule<S>>) -> Self {
        let mut rulebook = Self::empty();
        for rule in rules {
            debug_assert!(rulebook.rule_for(&rule.state, rule.symbol).is_none());
            rulebook.push(rule);
        }
        rulebook
    }

    fn empty() -> Self {
        Self {
            rules: Vec::new(),
            transitions: HashMap::new(),
        }
    }

    fn push(&mut self, rule: DfaRule<S>) {
        self.transitions
            .entry(rule.state.clone())
            .or_default()
            .insert(rule.symbol, self.rules.len());
        self.rules.push(rule);
    }

    /// All rules, in the order they were given.
    pub fn rules(&self) -> &[DfaRule<S>] {
        &self.rules
    }

    /// The single rule that fires in `state` on `c`, if any.
    pub fn rule_for(&self, state: &S, c: char) -> Option<&DfaRule<S>> {
        self.transitions
            .get(state)
            .and_then(|by_char| by_char.get(&c))
            .map(|&position| &self.rules[position])
    }

    /// The state reached from `state` on `c`, if any rule applies.
    pub fn next_state(&self, state: &S, c: char) -> Option<&S> {
        self.rule_for(state, c).map(|rule| rule.follow())
    }

    /// Get the alphabet (all characters consumed by some rule).
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.rules.iter().map(|rule| rule.symbol).collect()
    }
}

/// A running DFA.
///
/// A DFA that reads a character no rule covers falls into the dead state
/// (`current_state()` returns `None`), stays there, and never accepts.
#[derive(Debug, Clone)]
pub struct Dfa<'a, S = StateSet> {
    current_state: Option<S>,
    accept_states: &'a IndexSet<S>,
    rulebook: &'a DfaRulebook<S>,
}

impl<'a, S: Clone + Eq + Hash + fmt::Debug> Dfa<'a, S> {
    /// Create a new DFA runtime in `current_state`.
    pub fn new(
        current_state: S,
        accept_states: &'a IndexSet<S>,
        rulebook: &'a DfaRulebook<S>,
    ) -> Self {
        Self {
            current_state: Some(current_state),
            accept_states,
            rulebook,
        }
    }

    /// The current state, or `None` once the DFA is dead.
    pub fn current_state(&self) -> Option<&S> {
        self.current_state.as_ref()
    }

    /// Check if the current state is an accept state.
    pub fn is_accepting(&self) -> bool {
        self.current_state
            .as_ref()
            .is_some_and(|state| self.accept_states.contains(state))
    }

    /// Consume one character.
    pub fn read_char(&mut self, c: char) {
        self.current_state = self
            .current_state
            .take()
            .and_then(|state| self.rulebook.next_state(&state, c).cloned());
    }

    /// Consume every character of `input`, left to right.
    pub fn read_string(&mut self, input: &str) {
        for c in input.chars() {
            if self.current_state.is_none() {
                break;
            }
            self.read_char(c);
        }
    }
}

/// An immutable DFA template that hands out fresh [`Dfa`] runtimes.
#[derive(Debug, Clone)]
pub struct DfaDesign<S = StateSet> {
    start_state: S,
    accept_states: IndexSet<S>,
    rulebook: DfaRulebook<S>,
}

impl<S: Clone + Eq + Hash + fmt::Debug> DfaDesign<S> {
    /// Create a new DFA design.
    pub fn new(
        start_state: S,
        accept_states: impl IntoIterator<Item = S>,
        rulebook: DfaRulebook<S>,
    ) -> Self {
        Self {
            start_state,
            accept_states: accept_states.into_iter().collect(),
            rulebook,
        }
    }

    pub fn start_state(&self) -> &S {
        &self.start_state
    }

    pub fn accept_states(&self) -> &IndexSet<S> {
        &self.accept_states
    }

    pub fn rulebook(&self) -> &DfaRulebook<S> {
        &self.rulebook
    }

    /// Every state mentioned by the start state or a rule, in discovery
    /// order.
    pub fn states(&self) -> IndexSet<&S> {
        let mut states = IndexSet::new();
        states.insert(&self.start_state);
        for rule in self.rulebook.rules() {
            states.insert(&rule.state);
            states.insert(&rule.next_state);
        }
        states
    }

    /// A fresh DFA sitting in the start state.
    pub fn to_dfa(&self) -> Dfa<'_, S> {
        Dfa::new(self.start_state.clone(), &self.accept_states, &self.rulebook)
    }

    /// Run `input` through a fresh DFA and report whether it accepts.
    pub fn accepts(&self, input: &str) -> bool {
        let mut dfa = self.to_dfa();
        dfa.read_string(input);
        dfa.is_accepting()
    }
}
