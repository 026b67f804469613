//! Thompson construction: compiles a [`Pattern`] into an [`NfaDesign`].

use crate::automaton::{NfaDesign, NfaRule, NfaRulebook, StateAllocator, StateId};
use crate::pattern::Pattern;
use indexmap::IndexMap;
use log::trace;

/// The part of an NFA built for one subtree.
struct Fragment {
    start_state: StateId,
    accept_states: Vec<StateId>,
}

/// Accumulates the rules of every subtree. Each subtree gets states nobody
/// else has, so fragments can be wired together without renaming.
pub(crate) struct Compiler {
    states: StateAllocator,
    rules: Vec<NfaRule>,
    labels: IndexMap<StateId, String>,
}

impl Compiler {
    pub(crate) fn new() -> Self {
        Self {
            states: StateAllocator::new(),
            rules: Vec::new(),
            labels: IndexMap::new(),
        }
    }

    pub(crate) fn compile(mut self, pattern: &Pattern) -> NfaDesign {
        let fragment = self.fragment(pattern);

        trace!(
            "Compiled /{pattern}/: {} states, {} rules",
            self.states.allocated(),
            self.rules.len()
        );

        NfaDesign::new(
            fragment.start_state,
            fragment.accept_states,
            NfaRulebook::new(self.rules),
        )
        .with_labels(self.labels)
    }

    fn state(&mut self, pattern: &Pattern, role: &str) -> StateId {
        let state = self.states.fresh();
        self.labels.insert(state, format!("/{pattern}/ {role}"));
        state
    }

    fn fragment(&mut self, pattern: &Pattern) -> Fragment {
        match pattern {
            Pattern::Empty => {
                let start_state = self.state(pattern, "start");
                Fragment {
                    start_state,
                    accept_states: vec![start_state],
                }
            }
            Pattern::Literal(c) => {
                let start_state = self.state(pattern, "start");
                let accept_state = self.state(pattern, "accept");
                self.rules
                    .push(NfaRule::new(start_state, *c, accept_state));
                Fragment {
                    start_state,
                    accept_states: vec![accept_state],
                }
            }
            Pattern::Concatenate(first, second) => {
                let first = self.fragment(first);
                let second = self.fragment(second);
                for &state in &first.accept_states {
                    self.rules
                        .push(NfaRule::epsilon(state, second.start_state));
                }
                Fragment {
                    start_state: first.start_state,
                    accept_states: second.accept_states,
                }
            }
            Pattern::Choose(first, second) => {
                let first = self.fragment(first);
                let second = self.fragment(second);
                let start_state = self.state(pattern, "start");
                self.rules
                    .push(NfaRule::epsilon(start_state, first.start_state));
                self.rules
                    .push(NfaRule::epsilon(start_state, second.start_state));

                let mut accept_states = first.accept_states;
                accept_states.extend(second.accept_states);
                Fragment {
                    start_state,
                    accept_states,
                }
            }
            Pattern::Repeat(inner) => {
                let inner = self.fragment(inner);
                let start_state = self.state(pattern, "start");
                self.rules
                    .push(NfaRule::epsilon(start_state, inner.start_state));
                for &state in &inner.accept_states {
                    self.rules
                        .push(NfaRule::epsilon(state, inner.start_state));
                }

                // The new start state accepts, so zero repetitions match.
                let mut accept_states = vec![start_state, inner.start_state];
                accept_states.extend(inner.accept_states);
                Fragment {
                    start_state,
                    accept_states,
                }
            }
        }
    }
}
