//! Instrumentation macros.

use crate::factory::ProfilerMarkerFactory;
use crate::marker::MarkerDesc;
use crate::scope::{ScopedProfiler, ScopedProfilerThread};

#[doc(hidden)]
#[inline]
#[must_use]
pub fn scoped_marker(
    factory: Option<&ProfilerMarkerFactory>,
    marker: &MarkerDesc,
) -> Option<ScopedProfiler> {
    factory.map(|factory| factory.create_scoped_profiler(marker))
}

#[doc(hidden)]
#[inline]
#[must_use]
pub fn scoped_thread(
    factory: Option<&ProfilerMarkerFactory>,
    group_name: &str,
    name: &str,
) -> Option<ScopedProfilerThread> {
    factory.map(|factory| factory.create_scoped_profiler_thread(group_name, name))
}

/// Time the rest of the enclosing block under a registered marker.
///
/// `$factory` is an `Option<&ProfilerMarkerFactory>`; nothing is recorded
/// when it is `None`. When the `profiling` feature is disabled, this macro
/// expands to nothing.
///
/// # Examples
///
/// ```ignore
/// use media_profiler::profile_marker;
///
/// fn encode_frame(factory: Option<&ProfilerMarkerFactory>, marker: &MarkerDesc) {
///     profile_marker!(factory, marker);
///     // ... encode
/// } // region ends here
/// ```
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_marker {
    ($factory:expr, $marker:expr) => {
        let _profile_guard = $crate::macros::scoped_marker($factory, $marker);
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_marker {
    ($factory:expr, $marker:expr) => {};
}

/// Attribute the rest of the enclosing block to a named profiler thread.
///
/// When the `profiling` feature is disabled, this macro expands to nothing.
///
/// ```ignore
/// profile_thread!(factory, "WebRTC", "EncoderWorker");
/// ```
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_thread {
    ($factory:expr, $group:expr, $name:expr) => {
        let _profile_thread_guard = $crate::macros::scoped_thread($factory, $group, $name);
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_thread {
    ($factory:expr, $group:expr, $name:expr) => {};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_factory_opens_nothing() {
        assert!(scoped_thread(None, "Group", "Worker").is_none());
    }
}
