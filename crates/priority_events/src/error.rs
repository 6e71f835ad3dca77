//! Error types for the priority event emitter

/// Errors returned by listener registration.
///
/// Dispatch itself never fails: unknown event names are treated as empty and
/// listener outcomes are reported through [`Flow`](crate::Flow).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventError {
    /// An argument was rejected before any structure was mutated
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument (e.g. `"priority"`)
        field: &'static str,
        /// Human readable description of the violation
        reason: String,
    },
}

impl EventError {
    /// Builds the error raised for a priority that cannot be ordered.
    pub(crate) fn invalid_priority(priority: f64) -> Self {
        EventError::InvalidArgument {
            field: "priority",
            reason: format!("must be a number and not NaN, received {priority}"),
        }
    }

    /// Name of the argument this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            EventError::InvalidArgument { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_priority_names_field() {
        let err = EventError::invalid_priority(f64::NAN);
        assert_eq!(err.field(), "priority");
        assert!(err.to_string().contains("priority"));
        assert!(err.to_string().contains("NaN"));
    }
}
