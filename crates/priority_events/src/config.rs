//! Emitter configuration

use serde::{Deserialize, Serialize};

/// Default for max_listeners
fn default_max_listeners() -> usize {
    crate::DEFAULT_MAX_LISTENERS
}

/// Settings applied when constructing a [`PriorityEmitter`](crate::PriorityEmitter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Listener count per event name above which a warning is logged (0 = unbounded)
    #[serde(default = "default_max_listeners")]
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: default_max_listeners(),
        }
    }
}

impl EmitterConfig {
    /// Configuration with no listener ceiling.
    pub fn unbounded() -> Self {
        Self { max_listeners: 0 }
    }
}
