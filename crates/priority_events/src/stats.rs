/// Statistics tracking for the emitter
use serde::{Deserialize, Serialize};

/// Counters describing dispatch activity since the emitter was created
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterStats {
    /// Emit calls that found at least one listener
    pub events_emitted: u64,
    /// Listener invocations, meta-event listeners included
    pub listeners_invoked: u64,
    /// Emit calls cut short by a listener returning a stop signal
    pub dispatches_stopped: u64,
    /// Max-listener warnings sent to the warning sink
    pub warnings_issued: u64,
}
