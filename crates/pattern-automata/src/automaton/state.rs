//! State types for automata.

use fixedbitset::FixedBitSet;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
pub type StateId = u32;

/// Hands out fresh state identifiers. An identifier is never handed out twice
/// by the same allocator, so automata built from one allocator never share
/// states by accident.
#[derive(Debug, Clone, Default)]
pub struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    /// Create a new allocator whose first fresh state is `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a state that has not been handed out before.
    pub fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of states allocated so far.
    pub fn allocated(&self) -> StateId {
        self.next
    }
}

/// A set of states implemented using a growable bit set.
///
/// Equality, ordering and hashing only look at the members, never at the
/// capacity of the underlying bit set, which makes a `StateSet` usable as the
/// identity of a DFA state produced by subset construction. The empty set is
/// the dead state.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty state set with room for states `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::with_capacity(state as usize + 1);
        set.insert(state);
        set
    }

    /// Insert a state into the set. Returns `true` if it was not there yet.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Check if every state of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|state| other.contains(state))
    }

    /// The members as a sorted vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for member in self.iter() {
            member.hash(state);
        }
    }
}

impl PartialOrd for StateSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StateSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{state}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl<const N: usize> From<[StateId; N]> for StateSet {
    fn from(states: [StateId; N]) -> Self {
        states.into_iter().collect()
    }
}
