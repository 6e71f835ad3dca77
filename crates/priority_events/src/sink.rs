//! Warning output used by max-listener accounting

use tracing::warn;

/// Receives formatted warnings from the emitter.
///
/// The emitter calls this at most once per event name per over-limit
/// episode; see [`ListenerRegistry::check_limit`](crate::ListenerRegistry::check_limit).
/// No emitter borrow is held during the call.
pub trait WarningSink {
    fn warn(&self, message: &str);
}

/// Default sink forwarding warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarningSink;

impl WarningSink for TracingWarningSink {
    fn warn(&self, message: &str) {
        warn!(target: crate::LOG_TARGET, "⚠️ {}", message);
    }
}

/// Formats the max-listener warning for `event_name` given the configured ceiling.
pub fn max_listeners_warning(event_name: &str, ceiling: usize) -> String {
    format!(
        "MaxListenersExceededWarning: Possible EventEmitter memory leak detected. {} {} listeners added. Use emitter.set_max_listeners() to increase limit",
        ceiling + 1,
        event_name
    )
}
