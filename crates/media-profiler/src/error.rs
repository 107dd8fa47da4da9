//! Profiler adapter error types.

use thiserror::Error;

/// Errors raised while registering markers or opening timed regions.
///
/// A missing host profiler is not an error: [`ProfilerMarkerFactory::create`]
/// returns `None` and call sites skip instrumentation.
///
/// [`ProfilerMarkerFactory::create`]: crate::ProfilerMarkerFactory::create
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfilerError {
    /// The host rejected a marker registration.
    #[error("host profiler rejected marker `{name}` with status {status}")]
    MarkerRegistration {
        /// Name the marker was registered under.
        name: String,
        /// Nonzero status returned by the host.
        status: i32,
    },

    /// Marker names must not be empty.
    #[error("marker name must not be empty")]
    EmptyMarkerName,

    /// A region carried more event data fields than its marker declared.
    #[error("marker `{marker}` declares {declared} event data fields, {supplied} supplied")]
    TooManyEventData {
        /// Marker the region was opened with.
        marker: String,
        /// Field count declared at registration.
        declared: u16,
        /// Field count passed when opening the region.
        supplied: usize,
    },

    /// The operation exists on the factory but is not supported yet.
    #[error("{operation} is not implemented")]
    Unimplemented {
        /// Name of the unsupported operation.
        operation: &'static str,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, ProfilerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_mentions_status_and_name() {
        let err = ProfilerError::MarkerRegistration {
            name: "Encode".to_string(),
            status: -3,
        };
        let message = err.to_string();
        assert!(message.contains("Encode"));
        assert!(message.contains("-3"));
    }

    #[test]
    fn unimplemented_names_the_operation() {
        let err = ProfilerError::Unimplemented {
            operation: "create_category",
        };
        assert_eq!(err.to_string(), "create_category is not implemented");
    }
}
