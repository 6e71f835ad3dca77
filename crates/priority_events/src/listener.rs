//! Listener callbacks, dispatch arguments and the continuation signal
//!
//! A [`Listener`] is a reference-counted callback. Identity is reference
//! identity: two `Listener`s are equal only when one was cloned from the
//! other, which is what removal and once-cleanup match on.

use crate::emitter::PriorityEmitter;
use std::fmt;
use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Continuation signal returned by a listener invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep dispatching to the next listener
    Continue,
    /// Abandon the remaining listeners of the current emit call
    Stop,
}

/// Conversion from a listener's return value into a [`Flow`].
///
/// `()` and `true` continue, `false` stops.
pub trait IntoFlow {
    fn into_flow(self) -> Flow;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Flow {
        self
    }
}

impl IntoFlow for () {
    fn into_flow(self) -> Flow {
        Flow::Continue
    }
}

impl IntoFlow for bool {
    fn into_flow(self) -> Flow {
        if self {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}

impl<B, C> IntoFlow for ControlFlow<B, C> {
    fn into_flow(self) -> Flow {
        match self {
            ControlFlow::Continue(_) => Flow::Continue,
            ControlFlow::Break(_) => Flow::Stop,
        }
    }
}

/// Arguments handed to a listener for a single invocation.
///
/// User events carry a borrowed payload. The `newListener` and
/// `removeListener` meta-events carry the registration they describe.
pub enum EventArgs<'a, A> {
    /// Payload passed to [`PriorityEmitter::emit`]
    Payload(&'a A),
    /// A listener was registered
    NewListener {
        event_name: &'a str,
        listener: &'a Listener<A>,
        priority: f64,
    },
    /// A listener registration was removed
    RemoveListener {
        event_name: &'a str,
        listener: &'a Listener<A>,
        priority: f64,
    },
}

impl<'a, A> EventArgs<'a, A> {
    /// Returns the user payload, if this is not a meta-event.
    pub fn payload(&self) -> Option<&'a A> {
        match *self {
            EventArgs::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns `(event_name, listener, priority)` for meta-events.
    pub fn registration(&self) -> Option<(&'a str, &'a Listener<A>, f64)> {
        match *self {
            EventArgs::Payload(_) => None,
            EventArgs::NewListener { event_name, listener, priority }
            | EventArgs::RemoveListener { event_name, listener, priority } => {
                Some((event_name, listener, priority))
            }
        }
    }
}

impl<A> Clone for EventArgs<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for EventArgs<'_, A> {}

impl<A: fmt::Debug> fmt::Debug for EventArgs<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArgs::Payload(payload) => f.debug_tuple("Payload").field(payload).finish(),
            EventArgs::NewListener { event_name, listener, priority } => f
                .debug_struct("NewListener")
                .field("event_name", event_name)
                .field("listener", listener)
                .field("priority", priority)
                .finish(),
            EventArgs::RemoveListener { event_name, listener, priority } => f
                .debug_struct("RemoveListener")
                .field("event_name", event_name)
                .field("listener", listener)
                .field("priority", priority)
                .finish(),
        }
    }
}

/// Object-safe view over listener callbacks.
trait Invoke<A> {
    fn invoke(&self, emitter: &PriorityEmitter<A>, args: EventArgs<'_, A>) -> Flow;
}

/// Closure adapter remembering the closure's return type.
struct Callback<F, R> {
    f: F,
    _returns: PhantomData<fn() -> R>,
}

impl<A, F, R> Invoke<A> for Callback<F, R>
where
    F: Fn(&PriorityEmitter<A>, EventArgs<'_, A>) -> R,
    R: IntoFlow,
{
    fn invoke(&self, emitter: &PriorityEmitter<A>, args: EventArgs<'_, A>) -> Flow {
        (self.f)(emitter, args).into_flow()
    }
}

/// A callback registered on a [`PriorityEmitter`].
///
/// The callback receives the emitter as its receiver, so it can register,
/// remove or emit re-entrantly while it runs.
///
/// ```
/// use priority_events::{Listener, PriorityEmitter};
///
/// let emitter = PriorityEmitter::<u32>::new();
/// let listener = Listener::new(|_emitter: &PriorityEmitter<u32>, args| {
///     args.payload().map_or(true, |n| *n < 10)
/// });
/// emitter.on("tick", &listener).unwrap();
/// assert!(emitter.emit("tick", &3));
/// ```
pub struct Listener<A> {
    callback: Rc<dyn Invoke<A>>,
}

impl<A> Listener<A> {
    /// Wraps a callback. Anything implementing [`IntoFlow`] may be returned.
    pub fn new<F, R>(callback: F) -> Self
    where
        F: Fn(&PriorityEmitter<A>, EventArgs<'_, A>) -> R + 'static,
        R: IntoFlow + 'static,
    {
        Self {
            callback: Rc::new(Callback {
                f: callback,
                _returns: PhantomData,
            }),
        }
    }

    /// Invokes the callback with `emitter` as receiver.
    pub fn call(&self, emitter: &PriorityEmitter<A>, args: EventArgs<'_, A>) -> Flow {
        self.callback.invoke(emitter, args)
    }

    /// Returns true when both handles refer to the same registered callback.
    pub fn same_as(&self, other: &Listener<A>) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.callback) as *const ()
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.addr()).finish()
    }
}

/// A listener stored in an ordered set together with its dispatch metadata.
pub struct ListenerEntry<A> {
    listener: Listener<A>,
    priority: f64,
    once: bool,
}

impl<A> ListenerEntry<A> {
    pub fn new(listener: Listener<A>, priority: f64, once: bool) -> Self {
        Self {
            listener,
            priority,
            once,
        }
    }

    pub fn listener(&self) -> &Listener<A> {
        &self.listener
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Whether the entry is removed the first time it fires.
    pub fn once(&self) -> bool {
        self.once
    }
}

impl<A> Clone for ListenerEntry<A> {
    fn clone(&self) -> Self {
        Self {
            listener: self.listener.clone(),
            priority: self.priority,
            once: self.once,
        }
    }
}

impl<A> fmt::Debug for ListenerEntry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("listener", &self.listener)
            .field("priority", &self.priority)
            .field("once", &self.once)
            .finish()
    }
}

/// Introspection wrapper returned by [`PriorityEmitter::raw_listeners`].
///
/// Calling it mirrors what dispatch would do for this registration: a
/// once-registration removes itself from the emitter before the listener runs.
pub struct RawListener<'e, A> {
    emitter: &'e PriorityEmitter<A>,
    event_name: String,
    entry: ListenerEntry<A>,
}

impl<'e, A> RawListener<'e, A> {
    pub(crate) fn new(emitter: &'e PriorityEmitter<A>, event_name: &str, entry: ListenerEntry<A>) -> Self {
        Self {
            emitter,
            event_name: event_name.to_owned(),
            entry,
        }
    }

    /// The original listener reference.
    pub fn listener(&self) -> &Listener<A> {
        self.entry.listener()
    }

    pub fn priority(&self) -> f64 {
        self.entry.priority()
    }

    pub fn once(&self) -> bool {
        self.entry.once()
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Invokes the wrapped listener with a user payload.
    pub fn call(&self, payload: &A) -> Flow {
        if self.entry.once() {
            self.emitter.remove_listener(&self.event_name, self.entry.listener());
        }
        self.entry
            .listener()
            .call(self.emitter, EventArgs::Payload(payload))
    }
}

impl<A> fmt::Debug for RawListener<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawListener")
            .field("event_name", &self.event_name)
            .field("entry", &self.entry)
            .finish()
    }
}
