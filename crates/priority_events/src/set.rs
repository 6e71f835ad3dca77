//! Per-event ordered listener storage

use crate::listener::ListenerEntry;
use smallvec::SmallVec;

/// Ordered multiset of [`ListenerEntry`] values for one event name.
///
/// Entries are kept sorted by priority, highest first. Entries of equal
/// priority keep their insertion order. Uses SmallVec to avoid heap
/// allocations for the common case of a handful of listeners per event.
pub struct OrderedListenerSet<A> {
    entries: SmallVec<[ListenerEntry<A>; 4]>,
}

impl<A> OrderedListenerSet<A> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Inserts after every entry whose priority is greater than or equal to
    /// the new one, which keeps ties in registration order.
    pub fn insert(&mut self, entry: ListenerEntry<A>) {
        let priority = entry.priority();
        let index = self.entries.partition_point(|e| e.priority() >= priority);
        self.entries.insert(index, entry);
    }

    /// Removes the first entry, in priority order, matching `predicate`.
    pub fn remove_first_matching<P>(&mut self, mut predicate: P) -> Option<ListenerEntry<A>>
    where
        P: FnMut(&ListenerEntry<A>) -> bool,
    {
        let index = self.entries.iter().position(|e| predicate(e))?;
        Some(self.entries.remove(index))
    }

    /// Removes every entry matching `predicate` and returns them in priority order.
    pub fn remove_all_matching<P>(&mut self, mut predicate: P) -> Vec<ListenerEntry<A>>
    where
        P: FnMut(&ListenerEntry<A>) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = SmallVec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if predicate(&entry) {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        removed
    }

    /// Independent copy with the same entries in the same order.
    pub fn duplicate(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }

    /// Removes and returns the highest-priority entry.
    pub fn poll(&mut self) -> Option<ListenerEntry<A>> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListenerEntry<A>> {
        self.entries.iter()
    }

    /// Snapshot of the entries, priority descending.
    pub fn to_ordered_vec(&self) -> Vec<ListenerEntry<A>> {
        self.entries.to_vec()
    }
}

impl<A> Default for OrderedListenerSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for OrderedListenerSet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
