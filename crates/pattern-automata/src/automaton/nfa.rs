//! Non-deterministic finite automata with free (epsilon) moves.

use crate::automaton::rule::NfaRule;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

/// An unordered collection of NFA rules with lookups by `(state, symbol)`.
#[derive(Debug, Clone, Default)]
pub struct NfaRulebook {
    /// Rules in insertion order
    rules: Vec<NfaRule>,
    /// (source, symbol) -> positions in `rules`
    index: HashMap<(StateId, Symbol), Vec<usize>>,
}

impl NfaRulebook {
    /// Create a new rulebook, indexing the rules by `(state, symbol)`.
    pub fn new(rules: impl IntoIterator<Item = NfaRule>) -> Self {
        let rules: Vec<NfaRule> = rules.into_iter().collect();
        let mut index: HashMap<(StateId, Symbol), Vec<usize>> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            index
                .entry((rule.state, rule.symbol))
                .or_default()
                .push(position);
        }
        Self { rules, index }
    }

    /// All rules, in the order they were given.
    pub fn rules(&self) -> &[NfaRule] {
        &self.rules
    }

    /// Get all rules that fire in `state` on `symbol`.
    pub fn rules_for(&self, state: StateId, symbol: impl Into<Symbol>) -> Vec<&NfaRule> {
        self.index
            .get(&(state, symbol.into()))
            .into_iter()
            .flatten()
            .map(|&position| &self.rules[position])
            .collect()
    }

    /// Get the targets of all rules that fire in `state` on `symbol`.
    pub fn follow_rules_for(&self, state: StateId, symbol: impl Into<Symbol>) -> Vec<StateId> {
        self.rules_for(state, symbol)
            .into_iter()
            .map(|rule| *rule.follow())
            .collect()
    }

    /// Get the states reachable from any of `states` by one move on `symbol`.
    pub fn next_states(&self, states: &StateSet, symbol: impl Into<Symbol>) -> StateSet {
        let symbol = symbol.into();
        states
            .iter()
            .flat_map(|state| self.follow_rules_for(state, symbol))
            .collect()
    }

    /// Get the epsilon closure of a set of states: everything reachable through
    /// zero or more free moves.
    pub fn follow_free_moves(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }
            for next in self.follow_rules_for(state, Symbol::Epsilon) {
                if !closure.contains(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Get the alphabet (all characters consumed by some rule).
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.rules
            .iter()
            .filter_map(|rule| rule.symbol.as_char())
            .collect()
    }
}

/// A running NFA. Reading input moves the set of current states.
#[derive(Debug, Clone)]
pub struct Nfa<'a> {
    /// Current states, not necessarily closed under free moves
    current_states: StateSet,
    accept_states: &'a StateSet,
    rulebook: &'a NfaRulebook,
}

impl<'a> Nfa<'a> {
    /// Create a new NFA runtime. `current_states` is closed under free moves
    /// before anything is read.
    pub fn new(
        current_states: StateSet,
        accept_states: &'a StateSet,
        rulebook: &'a NfaRulebook,
    ) -> Self {
        Self {
            current_states,
            accept_states,
            rulebook,
        }
    }

    /// The current states, always closed under free moves.
    pub fn current_states(&self) -> StateSet {
        self.rulebook.follow_free_moves(&self.current_states)
    }

    /// Check if any current state is an accept state.
    pub fn is_accepting(&self) -> bool {
        self.current_states().intersects(self.accept_states)
    }

    /// Consume one character. Without a matching rule the NFA ends up with no
    /// current states and can never accept again.
    pub fn read_char(&mut self, c: char) {
        self.current_states = self.rulebook.next_states(&self.current_states(), c);
    }

    /// Consume every character of `input`, left to right.
    pub fn read_string(&mut self, input: &str) {
        for c in input.chars() {
            self.read_char(c);
        }
    }
}

/// An immutable NFA template that hands out fresh [`Nfa`] runtimes.
#[derive(Debug, Clone)]
pub struct NfaDesign {
    start_state: StateId,
    accept_states: StateSet,
    rulebook: NfaRulebook,
    /// Debug labels for states, filled in by the pattern compiler
    labels: IndexMap<StateId, String>,
}

impl NfaDesign {
    /// Create a new NFA design without state labels.
    pub fn new(
        start_state: StateId,
        accept_states: impl IntoIterator<Item = StateId>,
        rulebook: NfaRulebook,
    ) -> Self {
        Self {
            start_state,
            accept_states: accept_states.into_iter().collect(),
            rulebook,
            labels: IndexMap::new(),
        }
    }

    pub(crate) fn with_labels(mut self, labels: IndexMap<StateId, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn accept_states(&self) -> &StateSet {
        &self.accept_states
    }

    pub fn rulebook(&self) -> &NfaRulebook {
        &self.rulebook
    }

    /// The debug label recorded for `state`, if any.
    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get(&state).map(String::as_str)
    }

    /// Number of distinct states mentioned by the start state, the accept
    /// states and the rules.
    pub fn num_states(&self) -> usize {
        let mut states = StateSet::singleton(self.start_state);
        states.union_with(&self.accept_states);
        for rule in self.rulebook.rules() {
            states.insert(rule.state);
            states.insert(rule.next_state);
        }
        states.len()
    }

    /// A fresh NFA sitting in the start state.
    pub fn to_nfa(&self) -> Nfa<'_> {
        self.to_nfa_at(StateSet::singleton(self.start_state))
    }

    /// A fresh NFA sitting in an arbitrary set of states.
    pub fn to_nfa_at(&self, current_states: StateSet) -> Nfa<'_> {
        Nfa::new(current_states, &self.accept_states, &self.rulebook)
    }

    /// Run `input` through a fresh NFA and report whether it accepts.
    pub fn accepts(&self, input: &str) -> bool {
        let mut nfa = self.to_nfa();
        nfa.read_string(input);
        nfa.is_accepting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rulebook() -> NfaRulebook {
        NfaRulebook::new([
            NfaRule::new(1, 'a', 2),
            NfaRule::new(1, 'b', 1),
            NfaRule::new(1, 'a', 3),
            NfaRule::new(2, 'a', 2),
            NfaRule::new(2, 'b', 3),
            NfaRule::new(3, 'a', 3),
            NfaRule::new(3, 'b', 3),
            NfaRule::new(3, 'c', 4),
            NfaRule::epsilon(4, 2),
        ])
    }

    #[test]
    fn test_rules_for() {
        let rulebook = rulebook();
        assert_eq!(
            rulebook.rules_for(1, 'a'),
            vec![&NfaRule::new(1, 'a', 2), &NfaRule::new(1, 'a', 3)]
        );
        assert!(rulebook.rules_for(1, 'c').is_empty());
        assert_eq!(
            rulebook.rules_for(4, Symbol::Epsilon),
            vec![&NfaRule::epsilon(4, 2)]
        );
    }

    #[test]
    fn test_follow_rules_for() {
        assert_eq!(rulebook().follow_rules_for(1, 'a'), vec![2, 3]);
    }

    #[test]
    fn test_next_states() {
        let rulebook = rulebook();
        assert_eq!(
            rulebook.next_states(&StateSet::from([1, 2]), 'a'),
            StateSet::from([2, 3])
        );
        // Repeated targets collapse into one state.
        assert_eq!(
            rulebook.next_states(&StateSet::from([2, 3]), 'b'),
            StateSet::from([3])
        );
        assert!(rulebook.next_states(&StateSet::from([1]), 'z').is_empty());
    }

    #[test]
    fn test_follow_free_moves() {
        // 0 -ε-> 1 -ε-> 2 -ε-> 0, 2 -a-> 3
        let rulebook = NfaRulebook::new([
            NfaRule::epsilon(0, 1),
            NfaRule::epsilon(1, 2),
            NfaRule::epsilon(2, 0),
            NfaRule::new(2, 'a', 3),
        ]);

        assert_eq!(
            rulebook.follow_free_moves(&StateSet::from([0])),
            StateSet::from([0, 1, 2])
        );
        assert_eq!(
            rulebook.follow_free_moves(&StateSet::from([3])),
            StateSet::from([3])
        );
        assert!(rulebook.follow_free_moves(&StateSet::new()).is_empty());
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(rulebook().alphabet(), BTreeSet::from(['a', 'b', 'c']));
        assert!(NfaRulebook::new([NfaRule::epsilon(0, 1)]).alphabet().is_empty());
    }

    #[test]
    fn test_accepts() {
        let design = NfaDesign::new(1, [1, 2, 3, 4], rulebook());
        assert!(design.accepts("aa"));
        assert!(design.accepts("aac"));
        assert!(!design.accepts("bc"));
        assert!(!design.accepts("bbc"));
    }

    #[test]
    fn test_nfa_free_moves_are_followed_on_read() {
        let rulebook = rulebook();
        let accept_states = StateSet::from([3]);
        let mut nfa = Nfa::new(StateSet::from([1]), &accept_states, &rulebook);

        assert!(!nfa.is_accepting());
        nfa.read_char('b');
        assert!(!nfa.is_accepting());
        nfa.read_char('a');
        assert_eq!(nfa.current_states(), StateSet::from([2, 3]));
        assert!(nfa.is_accepting());
        nfa.read_string("c");
        assert_eq!(nfa.current_states(), StateSet::from([2, 4]));
    }

    #[test]
    fn test_nfa_at_arbitrary_state() {
        let design = NfaDesign::new(1, [3], rulebook());
        let nfa = design.to_nfa_at(StateSet::from([4]));
        assert_eq!(nfa.current_states(), StateSet::from([2, 4]));
    }

    #[test]
    fn test_unmatched_char_empties_current_states() {
        let design = NfaDesign::new(1, [1], rulebook());
        let mut nfa = design.to_nfa();
        assert!(nfa.is_accepting());
        nfa.read_char('z');
        assert!(nfa.current_states().is_empty());
        nfa.read_string("aaa");
        assert!(!nfa.is_accepting());
    }

    #[test]
    fn test_num_states() {
        assert_eq!(NfaDesign::new(1, [4], rulebook()).num_states(), 4);
        assert_eq!(NfaDesign::new(7, [7], NfaRulebook::default()).num_states(), 1);
    }
}
