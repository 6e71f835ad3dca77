//! # Priority Events
//!
//! A synchronous, priority-ordered event emitter. Listeners are registered per
//! event name with a numeric priority and run highest priority first when the
//! event is emitted. Any listener can end the current dispatch early.
//!
//! ## Key Features
//!
//! - **Priority Ordering**: Higher priorities run first, ties keep registration order
//! - **Early Termination**: Returning `false` (or [`Flow::Stop`]) skips the remaining listeners
//! - **Once Listeners**: Removed from the emitter the first time they fire
//! - **Snapshot Dispatch**: Listeners may add, remove or emit re-entrantly without
//!   disturbing the dispatch in progress
//! - **Meta-Events**: `newListener` and `removeListener` are emitted through the same path
//! - **Leak Warnings**: One warning per event name each time the listener ceiling is crossed
//!
//! ## Architecture
//!
//! - **OrderedListenerSet**: per-event storage in dispatch order
//! - **ListenerRegistry**: event name mapping and max-listener accounting
//! - **PriorityEmitter**: public surface and the emit protocol
//! - **WarningSink**: where max-listener warnings go (`tracing` by default)
//!
//! ## Usage
//!
//! ```
//! use priority_events::{Listener, PriorityEmitter};
//!
//! let emitter = PriorityEmitter::<String>::new();
//!
//! let audit = Listener::new(|_: &PriorityEmitter<String>, args| {
//!     if let Some(message) = args.payload() {
//!         println!("audit: {message}");
//!     }
//! });
//! let gate = Listener::new(|_: &PriorityEmitter<String>, args| {
//!     // Stop dispatch for empty messages
//!     args.payload().map_or(true, |message: &String| !message.is_empty())
//! });
//!
//! emitter.on("message", &audit).unwrap();
//! emitter.on_with_priority("message", &gate, 10.0).unwrap();
//!
//! assert!(emitter.emit("message", &"hello".to_string()));
//! assert!(!emitter.emit("unknown", &String::new()));
//! assert_eq!(emitter.listener_count("message"), 2);
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod listener;
pub mod registry;
pub mod set;
pub mod sink;
pub mod stats;


// Re-exports for convenience
pub use config::EmitterConfig;
pub use emitter::PriorityEmitter;
pub use error::EventError;
pub use listener::{EventArgs, Flow, IntoFlow, Listener, ListenerEntry, RawListener};
pub use registry::{LimitStatus, ListenerRegistry};
pub use set::OrderedListenerSet;
pub use sink::{max_listeners_warning, TracingWarningSink, WarningSink};
pub use stats::EmitterStats;

/// Default per-event listener ceiling
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Priority used by registration methods that do not take one
pub const DEFAULT_PRIORITY: f64 = 1.0;

/// Meta-event emitted after every successful registration
pub const NEW_LISTENER: &str = "newListener";

/// Meta-event emitted for every registration removed
pub const REMOVE_LISTENER: &str = "removeListener";

/// `tracing` target for events logged by this crate
pub const LOG_TARGET: &str = "priority_events";

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EventError>;
