//! Subset construction algorithm for converting an NFA design to a DFA design.
//!
//! Every DFA state is the epsilon-closed set of NFA states the NFA could be in
//! after reading some input. The number of such sets can be exponential in the
//! number of NFA states; the construction is not bounded and will run until
//! it has found them all.

use crate::automaton::dfa::{DfaDesign, DfaRulebook};
use crate::automaton::nfa::NfaDesign;
use crate::automaton::rule::DfaRule;
use crate::automaton::state::StateSet;
use indexmap::IndexSet;
use log::{debug, trace};
use std::collections::BTreeSet;

/// Simulates an [`NfaDesign`] from arbitrary sets of states in order to derive
/// an equivalent DFA.
#[derive(Debug, Clone, Copy)]
pub struct NfaSimulation<'a> {
    nfa_design: &'a NfaDesign,
}

impl<'a> NfaSimulation<'a> {
    /// Create a new simulation of `nfa_design` over sets of its states.
    pub fn new(nfa_design: &'a NfaDesign) -> Self {
        Self { nfa_design }
    }

    /// The epsilon-closed set of states reached from `states` on `c`.
    pub fn next_state(&self, states: &StateSet, c: char) -> StateSet {
        let mut nfa = self.nfa_design.to_nfa_at(states.clone());
        nfa.read_char(c);
        nfa.current_states()
    }

    /// The characters the NFA can consume.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.nfa_design.rulebook().alphabet()
    }

    /// One rule per alphabet character leaving `states`. Characters the NFA
    /// cannot consume from `states` lead to the empty (dead) set.
    pub fn rules_for(&self, states: &StateSet) -> Vec<DfaRule<StateSet>> {
        self.alphabet()
            .into_iter()
            .map(|c| DfaRule::new(states.clone(), c, self.next_state(states, c)))
            .collect()
    }

    /// Explore every state set reachable from `states`.
    ///
    /// Returns the known state sets (seeds first, then in discovery order) and
    /// the rules between them. The dead set is explored like any other state,
    /// so the rules cover every `(state, character)` pair over the alphabet.
    pub fn discover_rules_and_states(
        &self,
        states: impl IntoIterator<Item = StateSet>,
    ) -> (IndexSet<StateSet>, IndexSet<DfaRule<StateSet>>) {
        let alphabet = self.alphabet();
        let mut known: IndexSet<StateSet> = states.into_iter().collect();
        let mut rules: IndexSet<DfaRule<StateSet>> = IndexSet::new();

        // Everything before `expanded` already has its rules.
        let mut expanded = 0;
        while let Some(current) = known.get_index(expanded).cloned() {
            expanded += 1;

            for &c in &alphabet {
                let next = self.next_state(&current, c);
                if !known.contains(&next) {
                    trace!("Add state: {next} (from {current} on {c:?})");
                    known.insert(next.clone());
                }
                rules.insert(DfaRule::new(current.clone(), c, next));
            }
        }

        (known, rules)
    }

    /// Build the equivalent DFA design.
    pub fn to_dfa_design(&self) -> DfaDesign<StateSet> {
        let start_state = self.nfa_design.to_nfa().current_states();
        let (states, rules) = self.discover_rules_and_states([start_state.clone()]);

        let accept_states: Vec<StateSet> = states
            .iter()
            .filter(|&state| self.nfa_design.to_nfa_at(state.clone()).is_accepting())
            .cloned()
            .collect();

        debug!(
            "Subset construction: {} NFA states -> {} DFA states ({} accepting), {} rules",
            self.nfa_design.num_states(),
            states.len(),
            accept_states.len(),
            rules.len()
        );

        DfaDesign::new(
            start_state,
            accept_states,
            DfaRulebook::from_deterministic(rules),
        )
    }
}

/// Convert an NFA design to a DFA design using the powerset construction.
pub fn subset_construction(nfa_design: &NfaDesign) -> DfaDesign<StateSet> {
    NfaSimulation::new(nfa_design).to_dfa_design()
}

impl NfaDesign {
    /// Convert this design to an equivalent DFA design.
    pub fn to_dfa_design(&self) -> DfaDesign<StateSet> {
        subset_construction(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::nfa::NfaRulebook;
    use crate::automaton::rule::NfaRule;
    use pretty_assertions::assert_eq;

    fn nfa_design() -> NfaDesign {
        NfaDesign::new(
            1,
            [4],
            NfaRulebook::new([
                NfaRule::new(1, 'a', 2),
                NfaRule::new(1, 'b', 1),
                NfaRule::new(1, 'a', 3),
                NfaRule::new(2, 'a', 2),
                NfaRule::new(2, 'b', 3),
                NfaRule::new(2, 'b', 4),
                NfaRule::new(3, 'a', 3),
                NfaRule::new(3, 'b', 3),
                NfaRule::new(3, 'c', 4),
                NfaRule::epsilon(4, 2),
            ]),
        )
    }

    #[test]
    fn test_next_state() {
        let design = nfa_design();
        let simulation = NfaSimulation::new(&design);

        assert_eq!(
            simulation.next_state(&StateSet::from([1]), 'a'),
            StateSet::from([2, 3])
        );
        assert_eq!(
            simulation.next_state(&StateSet::from([2]), 'b'),
            StateSet::from([2, 3, 4])
        );
        assert_eq!(
            simulation.next_state(&StateSet::from([1, 2]), 'b'),
            StateSet::from([1, 2, 3, 4])
        );
    }

    #[test]
    fn test_alphabet() {
        let design = nfa_design();
        assert_eq!(
            NfaSimulation::new(&design).alphabet(),
            BTreeSet::from(['a', 'b', 'c'])
        );
    }

    #[test]
    fn test_rules_for() {
        let design = nfa_design();
        let state = StateSet::from([1, 2]);

        assert_eq!(
            NfaSimulation::new(&design).rules_for(&state),
            vec![
                DfaRule::new(state.clone(), 'a', StateSet::from([2, 3])),
                DfaRule::new(state.clone(), 'b', StateSet::from([1, 2, 3, 4])),
                DfaRule::new(state.clone(), 'c', StateSet::new()),
            ]
        );
    }

    #[test]
    fn test_discover_rules_and_states() {
        let design = NfaDesign::new(
            1,
            [3],
            NfaRulebook::new([
                NfaRule::new(1, 'a', 2),
                NfaRule::new(1, 'a', 1),
                NfaRule::new(2, 'a', 2),
                NfaRule::new(2, 'b', 3),
                NfaRule::new(3, 'a', 3),
                NfaRule::new(3, 'b', 3),
            ]),
        );

        let (states, rules) =
            NfaSimulation::new(&design).discover_rules_and_states([StateSet::from([1])]);

        let states: BTreeSet<StateSet> = states.into_iter().collect();
        assert_eq!(
            states,
            BTreeSet::from([
                StateSet::new(),
                StateSet::from([1]),
                StateSet::from([1, 2]),
                StateSet::from([3]),
            ])
        );

        let expected: IndexSet<DfaRule<StateSet>> = [
            DfaRule::new(StateSet::new(), 'a', StateSet::new()),
            DfaRule::new(StateSet::new(), 'b', StateSet::new()),
            DfaRule::new(StateSet::from([1]), 'a', StateSet::from([1, 2])),
            DfaRule::new(StateSet::from([1]), 'b', StateSet::new()),
            DfaRule::new(StateSet::from([1, 2]), 'a', StateSet::from([1, 2])),
            DfaRule::new(StateSet::from([1, 2]), 'b', StateSet::from([3])),
            DfaRule::new(StateSet::from([3]), 'a', StateSet::from([3])),
            DfaRule::new(StateSet::from([3]), 'b', StateSet::from([3])),
        ]
        .into_iter()
        .collect();
        assert_eq!(rules.len(), expected.len());
        assert!(rules.iter().all(|rule| expected.contains(rule)));
    }

    #[test]
    fn test_equivalent_dfa() {
        let nfa_design = nfa_design();
        let dfa_design = nfa_design.to_dfa_design();

        for input in [
            "", "a", "b", "c", "aa", "ab", "ac", "ba", "bb", "bc", "ca", "cb", "cc", "abc", "bac",
            "bca", "acb", "cab", "cba",
        ] {
            assert_eq!(
                nfa_design.accepts(input),
                dfa_design.accepts(input),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_dfa_is_total_and_deterministic() {
        let nfa_design = nfa_design();
        let dfa_design = subset_construction(&nfa_design);
        let alphabet = nfa_design.rulebook().alphabet();
        let states = dfa_design.states();

        assert_eq!(dfa_design.rulebook().rules().len(), states.len() * alphabet.len());
        for state in &states {
            for &c in &alphabet {
                let matching = dfa_design
                    .rulebook()
                    .rules()
                    .iter()
                    .filter(|rule| rule.applies_to(*state, &c))
                    .count();
                assert_eq!(matching, 1, "{state} on {c:?}");
            }
        }
        assert!(states.contains(&&StateSet::new()));
    }

    #[test]
    fn test_start_state_is_closed() {
        let design = NfaDesign::new(
            0,
            [2],
            NfaRulebook::new([NfaRule::epsilon(0, 1), NfaRule::new(1, 'a', 2)]),
        );
        let dfa_design = design.to_dfa_design();

        assert_eq!(dfa_design.start_state(), &StateSet::from([0, 1]));
        assert!(dfa_design.accepts("a"));
        assert!(!dfa_design.accepts(""));
        assert!(!dfa_design.accepts("aa"));
        // Characters outside the alphabet have no rule at all.
        assert!(!dfa_design.accepts("b"));
    }
}
