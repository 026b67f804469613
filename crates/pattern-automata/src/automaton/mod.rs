//! Finite automata over characters.
//!
//! This module provides:
//! - Nondeterministic rulebooks with epsilon-closure computation
//! - NFA and DFA runtimes and the immutable designs that produce them
//! - Subset construction (NFA to DFA conversion)

mod dfa;
mod nfa;
mod rule;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::{Dfa, DfaDesign, DfaRulebook};
pub use nfa::{Nfa, NfaDesign, NfaRulebook};
pub use rule::{DfaRule, FaRule, NfaRule};
pub use state::{StateAllocator, StateId, StateSet};
pub use subset_construction::{NfaSimulation, subset_construction};
pub use symbol::Symbol;
