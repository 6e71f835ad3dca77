//! Event name to listener set mapping with max-listener accounting

use crate::error::EventError;
use crate::listener::{Listener, ListenerEntry};
use crate::set::OrderedListenerSet;
use crate::sink::max_listeners_warning;
use compact_str::CompactString;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outcome of a max-listener check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitStatus {
    /// At or below the ceiling, or unbounded
    Within,
    /// Above the ceiling. `warning` is set only on the check that opened the episode.
    Exceeded { warning: Option<String> },
}

impl LimitStatus {
    pub fn is_within(&self) -> bool {
        matches!(self, LimitStatus::Within)
    }
}

/// Maps event names to their [`OrderedListenerSet`].
///
/// Event names are remembered in the order they were first seen and are only
/// forgotten by [`clear`](Self::clear) with no name. A ceiling of `0` disables
/// max-listener warnings.
pub struct ListenerRegistry<A> {
    sets: HashMap<CompactString, OrderedListenerSet<A>>,
    names: Vec<CompactString>,
    /// Names currently inside an over-limit episode
    warned: HashSet<CompactString>,
    max_listeners: usize,
    warnings_issued: u64,
}

impl<A> ListenerRegistry<A> {
    pub fn new(max_listeners: usize) -> Self {
        Self {
            sets: HashMap::new(),
            names: Vec::new(),
            warned: HashSet::new(),
            max_listeners,
            warnings_issued: 0,
        }
    }

    /// Returns the set for `event_name`, creating an empty one on first use.
    pub fn get_or_create(&mut self, event_name: &str) -> &mut OrderedListenerSet<A> {
        let names = &mut self.names;
        self.sets
            .entry(CompactString::new(event_name))
            .or_insert_with_key(|name| {
                names.push(name.clone());
                OrderedListenerSet::new()
            })
    }

    pub fn get(&self, event_name: &str) -> Option<&OrderedListenerSet<A>> {
        self.sets.get(event_name)
    }

    /// Validates and inserts an entry. Nothing is mutated on error.
    pub fn register(&mut self, event_name: &str, entry: ListenerEntry<A>) -> Result<(), EventError> {
        if entry.priority().is_nan() {
            return Err(EventError::invalid_priority(entry.priority()));
        }
        self.get_or_create(event_name).insert(entry);
        Ok(())
    }

    /// Compares the current listener count for `event_name` with the ceiling.
    ///
    /// The first check that sees the count above the ceiling returns the
    /// warning to deliver. Later checks return no warning until a check sees
    /// the count at or below the ceiling again.
    pub fn check_limit(&mut self, event_name: &str) -> LimitStatus {
        let size = self.count(event_name);

        if self.max_listeners != 0 && size > self.max_listeners {
            if self.warned.contains(event_name) {
                return LimitStatus::Exceeded { warning: None };
            }
            self.warned.insert(CompactString::new(event_name));
            self.warnings_issued += 1;
            return LimitStatus::Exceeded {
                warning: Some(max_listeners_warning(event_name, self.max_listeners)),
            };
        }

        self.warned.remove(event_name);
        LimitStatus::Within
    }

    /// Removes the first entry holding `listener`, whatever its priority or once flag.
    pub fn unregister(&mut self, event_name: &str, listener: &Listener<A>) -> Option<ListenerEntry<A>> {
        self.sets
            .get_mut(event_name)?
            .remove_first_matching(|entry| entry.listener().same_as(listener))
    }

    /// Number of once-registrations of `listener` for `event_name`.
    pub fn count_once(&self, event_name: &str, listener: &Listener<A>) -> usize {
        self.sets.get(event_name).map_or(0, |set| {
            set.iter()
                .filter(|entry| entry.once() && entry.listener().same_as(listener))
                .count()
        })
    }

    /// Removes the first once-registration of `listener` for `event_name`.
    pub fn remove_first_once(&mut self, event_name: &str, listener: &Listener<A>) -> Option<ListenerEntry<A>> {
        self.sets
            .get_mut(event_name)?
            .remove_first_matching(|entry| entry.once() && entry.listener().same_as(listener))
    }

    /// With a name, empties that name's set if it is known. Without one,
    /// forgets every event name.
    pub fn clear(&mut self, event_name: Option<&str>) {
        match event_name {
            Some(name) => {
                if let Some(set) = self.sets.get_mut(name) {
                    let removed = set.remove_all_matching(|_| true);
                    debug!("🧹 Cleared {} listeners for {}", removed.len(), name);
                }
            }
            None => {
                self.sets.clear();
                self.names.clear();
                self.warned.clear();
                debug!("🧹 Cleared all listeners");
            }
        }
    }

    /// Event names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(CompactString::as_str)
    }

    pub fn count(&self, event_name: &str) -> usize {
        self.sets.get(event_name).map_or(0, OrderedListenerSet::len)
    }

    /// Entries for `event_name`, priority descending. Empty if unknown.
    pub fn snapshot_entries(&self, event_name: &str) -> Vec<ListenerEntry<A>> {
        self.sets
            .get(event_name)
            .map(OrderedListenerSet::to_ordered_vec)
            .unwrap_or_default()
    }

    /// Ceiling, `0` meaning unbounded.
    pub fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    pub fn set_max_listeners(&mut self, max_listeners: usize) {
        self.max_listeners = max_listeners;
    }

    pub fn warnings_issued(&self) -> u64 {
        self.warnings_issued
    }
}

impl<A> std::fmt::Debug for ListenerRegistry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("names", &self.names)
            .field("warned", &self.warned)
            .field("max_listeners", &self.max_listeners)
            .finish()
    }
}
