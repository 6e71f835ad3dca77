//! The emitter: registration surface and the synchronous dispatch protocol

use crate::config::EmitterConfig;
use crate::error::EventError;
use crate::listener::{EventArgs, Flow, Listener, ListenerEntry, RawListener};
use crate::registry::{LimitStatus, ListenerRegistry};
use crate::sink::{TracingWarningSink, WarningSink};
use crate::stats::EmitterStats;
use crate::{DEFAULT_PRIORITY, NEW_LISTENER, REMOVE_LISTENER};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, trace};

/// Synchronous, priority-ordered event emitter.
///
/// Listeners run highest priority first; equal priorities run in registration
/// order. Every method takes `&self`, so listeners receive the emitter and may
/// register, remove or emit while a dispatch is in progress.
///
/// Each [`emit`](Self::emit) iterates a copy of the listener set taken when the
/// call starts. Registrations and removals made by listeners apply to later
/// emits only, except once-cleanup which edits the live set immediately.
///
/// ```
/// use priority_events::{Listener, PriorityEmitter};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let emitter = PriorityEmitter::<&str>::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// for (tag, priority) in [("a", 3.0), ("b", 1.0), ("c", 2.0)] {
///     let seen = seen.clone();
///     let listener = Listener::new(move |_: &PriorityEmitter<&str>, _| seen.borrow_mut().push(tag));
///     emitter.on_with_priority("x", &listener, priority).unwrap();
/// }
///
/// assert!(emitter.emit("x", &"payload"));
/// assert_eq!(*seen.borrow(), vec!["a", "c", "b"]);
/// ```
pub struct PriorityEmitter<A> {
    registry: RefCell<ListenerRegistry<A>>,
    stats: Cell<EmitterStats>,
    sink: Rc<dyn WarningSink>,
}

impl<A> PriorityEmitter<A> {
    /// Listener count per event name above which a warning is issued.
    pub const DEFAULT_MAX_LISTENERS: usize = crate::DEFAULT_MAX_LISTENERS;

    /// Creates an emitter with the default ceiling, warning through `tracing`.
    pub fn new() -> Self {
        Self::with_config(&EmitterConfig::default())
    }

    pub fn with_config(config: &EmitterConfig) -> Self {
        Self::with_sink(config, Rc::new(TracingWarningSink))
    }

    /// Creates an emitter sending max-listener warnings to `sink`.
    ///
    /// The sink runs with no internal borrow held, so it may query the emitter.
    pub fn with_sink(config: &EmitterConfig, sink: Rc<dyn WarningSink>) -> Self {
        Self {
            registry: RefCell::new(ListenerRegistry::new(config.max_listeners)),
            stats: Cell::new(EmitterStats::default()),
            sink,
        }
    }

    // Registration

    /// Registers `listener` for `event_name` at the default priority.
    pub fn add_listener(&self, event_name: &str, listener: &Listener<A>) -> Result<&Self, EventError> {
        self.register(event_name, listener, DEFAULT_PRIORITY, false)
    }

    /// Registers `listener` for `event_name` at `priority`.
    ///
    /// Fails with `InvalidArgument { field: "priority" }` for NaN, leaving the
    /// emitter untouched.
    pub fn add_listener_with_priority(
        &self,
        event_name: &str,
        listener: &Listener<A>,
        priority: f64,
    ) -> Result<&Self, EventError> {
        self.register(event_name, listener, priority, false)
    }

    pub fn on(&self, event_name: &str, listener: &Listener<A>) -> Result<&Self, EventError> {
        self.add_listener(event_name, listener)
    }

    pub fn on_with_priority(&self, event_name: &str, listener: &Listener<A>, priority: f64) -> Result<&Self, EventError> {
        self.add_listener_with_priority(event_name, listener, priority)
    }

    /// Same as [`add_listener`](Self::add_listener); placement is decided by priority.
    pub fn prepend_listener(&self, event_name: &str, listener: &Listener<A>) -> Result<&Self, EventError> {
        self.add_listener(event_name, listener)
    }

    pub fn prepend_listener_with_priority(
        &self,
        event_name: &str,
        listener: &Listener<A>,
        priority: f64,
    ) -> Result<&Self, EventError> {
        self.add_listener_with_priority(event_name, listener, priority)
    }

    /// Registers a listener that is removed the first time it fires.
    ///
    /// When it fires, every once-registration of the same listener on this
    /// event is removed together.
    pub fn once(&self, event_name: &str, listener: &Listener<A>) -> Result<&Self, EventError> {
        self.register(event_name, listener, DEFAULT_PRIORITY, true)
    }

    pub fn once_with_priority(&self, event_name: &str, listener: &Listener<A>, priority: f64) -> Result<&Self, EventError> {
        self.register(event_name, listener, priority, true)
    }

    pub fn prepend_once_listener(&self, event_name: &str, listener: &Listener<A>) -> Result<&Self, EventError> {
        self.once(event_name, listener)
    }

    pub fn prepend_once_listener_with_priority(
        &self,
        event_name: &str,
        listener: &Listener<A>,
        priority: f64,
    ) -> Result<&Self, EventError> {
        self.once_with_priority(event_name, listener, priority)
    }

    fn register(&self, event_name: &str, listener: &Listener<A>, priority: f64, once: bool) -> Result<&Self, EventError> {
        self.registry
            .borrow_mut()
            .register(event_name, ListenerEntry::new(listener.clone(), priority, once))?;
        self.check_max_listeners(event_name);

        debug!(
            "📝 Registered {} listener for {} (priority {})",
            if once { "once" } else { "persistent" },
            event_name,
            priority
        );

        self.dispatch(
            NEW_LISTENER,
            EventArgs::NewListener {
                event_name,
                listener,
                priority,
            },
        );
        Ok(self)
    }

    // Removal

    /// Removes one registration of `listener`, the first in priority order.
    ///
    /// Emits `removeListener` only when something was removed.
    pub fn remove_listener(&self, event_name: &str, listener: &Listener<A>) -> &Self {
        let removed = self.registry.borrow_mut().unregister(event_name, listener);
        if let Some(entry) = removed {
            debug!("🗑️ Removed listener from {} (priority {})", event_name, entry.priority());
            self.notify_removed(event_name, &entry);
        }
        self
    }

    pub fn off(&self, event_name: &str, listener: &Listener<A>) -> &Self {
        self.remove_listener(event_name, listener)
    }

    /// Empties one event's listeners, or forgets every event name when `None`.
    ///
    /// Does not emit `removeListener`. Clearing a name that was never seen is a
    /// no-op and does not make it appear in [`event_names`](Self::event_names).
    pub fn remove_all_listeners(&self, event_name: Option<&str>) -> &Self {
        self.registry.borrow_mut().clear(event_name);
        self
    }

    fn notify_removed(&self, event_name: &str, entry: &ListenerEntry<A>) {
        self.dispatch(
            REMOVE_LISTENER,
            EventArgs::RemoveListener {
                event_name,
                listener: entry.listener(),
                priority: entry.priority(),
            },
        );
    }

    // Dispatch

    /// Invokes the listeners of `event_name` with `payload`, highest priority first.
    ///
    /// Returns false without side effects when the event has no listeners. A
    /// listener returning a stop signal ends this call only.
    pub fn emit(&self, event_name: &str, payload: &A) -> bool {
        self.dispatch(event_name, EventArgs::Payload(payload))
    }

    fn dispatch(&self, event_name: &str, args: EventArgs<'_, A>) -> bool {
        let mut snapshot = match self.registry.borrow().get(event_name) {
            Some(set) if !set.is_empty() => set.duplicate(),
            _ => return false,
        };

        trace!("📤 Dispatching {} to {} listeners", event_name, snapshot.len());
        self.record(|stats| stats.events_emitted += 1);

        while let Some(entry) = snapshot.poll() {
            if entry.once() {
                self.remove_once_registrations(event_name, entry.listener());
            }

            self.record(|stats| stats.listeners_invoked += 1);
            if entry.listener().call(self, args) == Flow::Stop {
                trace!("⏹️ Dispatch of {} stopped by listener", event_name);
                self.record(|stats| stats.dispatches_stopped += 1);
                break;
            }
        }

        true
    }

    /// Removes every once-registration of `listener` present when cleanup
    /// starts, emitting `removeListener` after each removal.
    fn remove_once_registrations(&self, event_name: &str, listener: &Listener<A>) {
        let pending = self.registry.borrow().count_once(event_name, listener);
        for _ in 0..pending {
            let removed = self
                .registry
                .borrow_mut()
                .remove_first_once(event_name, listener);
            match removed {
                Some(entry) => self.notify_removed(event_name, &entry),
                None => break,
            }
        }
    }

    fn record(&self, update: impl FnOnce(&mut EmitterStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    // Introspection

    /// Known event names in the order they were first registered.
    pub fn event_names(&self) -> Vec<String> {
        self.registry.borrow().names().map(str::to_owned).collect()
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.registry.borrow().count(event_name)
    }

    /// Listener references in dispatch order. Repeated registrations appear repeatedly.
    pub fn listeners(&self, event_name: &str) -> Vec<Listener<A>> {
        self.registry
            .borrow()
            .snapshot_entries(event_name)
            .into_iter()
            .map(|entry| entry.listener().clone())
            .collect()
    }

    /// Wrappers over each registration in dispatch order.
    pub fn raw_listeners(&self, event_name: &str) -> Vec<RawListener<'_, A>> {
        let entries = self.registry.borrow().snapshot_entries(event_name);
        entries
            .into_iter()
            .map(|entry| RawListener::new(self, event_name, entry))
            .collect()
    }

    // Limits

    /// Sets the per-event listener ceiling; `0` disables the warning.
    pub fn set_max_listeners(&self, max_listeners: usize) -> &Self {
        self.registry.borrow_mut().set_max_listeners(max_listeners);
        self
    }

    /// Current ceiling, `None` when unbounded.
    pub fn max_listeners(&self) -> Option<usize> {
        match self.registry.borrow().max_listeners() {
            0 => None,
            n => Some(n),
        }
    }

    /// Runs the max-listener check for `event_name`; false while over the ceiling.
    pub fn check_max_listeners(&self, event_name: &str) -> bool {
        let status = self.registry.borrow_mut().check_limit(event_name);
        match status {
            LimitStatus::Within => true,
            LimitStatus::Exceeded { warning } => {
                if let Some(message) = warning {
                    self.sink.warn(&message);
                }
                false
            }
        }
    }

    pub fn stats(&self) -> EmitterStats {
        let mut stats = self.stats.get();
        stats.warnings_issued = self.registry.borrow().warnings_issued();
        stats
    }
}

impl<A> Default for PriorityEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for PriorityEmitter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityEmitter")
            .field("registry", &self.registry)
            .field("stats", &self.stats.get())
            .finish()
    }
}
