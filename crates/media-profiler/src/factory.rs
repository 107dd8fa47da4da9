//! Marker and scope factory bound to the host profiler.

use std::fmt;
use std::sync::Arc;

use crate::category::CategoryId;
use crate::error::{ProfilerError, Result};
use crate::host::{HostInterfaces, HostProfiler};
use crate::marker::{EventData, MarkerDesc, MarkerFlags};
use crate::scope::{ScopedProfiler, ScopedProfilerThread};

/// Single entry point to the host profiler.
///
/// A factory only exists when the host exposes a profiler, so holding one
/// means profiling is available. Keep it as `Option<ProfilerMarkerFactory>`
/// and skip instrumentation when it is `None`.
pub struct ProfilerMarkerFactory {
    profiler: Arc<dyn HostProfiler>,
}

impl ProfilerMarkerFactory {
    /// Query `interfaces` for the host profiler.
    ///
    /// Returns `None` when the host does not expose one, or exposes one that
    /// reports itself unavailable in this build.
    #[must_use]
    pub fn create(interfaces: &HostInterfaces) -> Option<Self> {
        let Some(profiler) = interfaces.get::<dyn HostProfiler>() else {
            tracing::debug!("Host profiler not exposed, instrumentation disabled");
            return None;
        };
        if !profiler.is_available() {
            tracing::debug!("Host profiler unavailable, instrumentation disabled");
            return None;
        }
        tracing::debug!("Host profiler found, marker factory created");
        Some(Self::new(profiler))
    }

    /// Bind a factory to a profiler the host handed over directly.
    #[must_use]
    pub fn new(profiler: Arc<dyn HostProfiler>) -> Self {
        Self { profiler }
    }

    /// Register a marker with the host.
    ///
    /// Call once per marker and reuse the descriptor. Registering the same
    /// name twice creates two markers.
    pub fn create_marker(
        &self,
        name: &str,
        category: CategoryId,
        flags: MarkerFlags,
        event_data_count: u16,
    ) -> Result<MarkerDesc> {
        if name.is_empty() {
            return Err(ProfilerError::EmptyMarkerName);
        }

        match self
            .profiler
            .create_marker(name, category, flags, event_data_count)
        {
            Ok(handle) => {
                tracing::trace!(
                    marker = name,
                    %category,
                    handle = handle.raw(),
                    "Registered profiler marker"
                );
                Ok(MarkerDesc::new(
                    handle,
                    name,
                    category,
                    flags,
                    event_data_count,
                ))
            }
            Err(status) => {
                tracing::error!(
                    marker = name,
                    status,
                    "Host profiler create_marker failed"
                );
                Err(ProfilerError::MarkerRegistration {
                    name: name.to_owned(),
                    status,
                })
            }
        }
    }

    /// Register a custom category.
    ///
    /// Not supported yet: always fails with [`ProfilerError::Unimplemented`]
    /// and never reaches the host. Use the built-in [`CategoryId`] constants.
    #[allow(clippy::unused_self)]
    pub fn create_category(&self, name: &str) -> Result<CategoryId> {
        tracing::debug!(
            category = name,
            "create_category requested but not supported"
        );
        Err(ProfilerError::Unimplemented {
            operation: "create_category",
        })
    }

    /// Open a timed region for `marker`. It ends when the handle is dropped.
    pub fn create_scoped_profiler(&self, marker: &MarkerDesc) -> ScopedProfiler {
        ScopedProfiler::begin(Arc::clone(&self.profiler), marker.clone(), &[])
    }

    /// Open a timed region carrying metadata fields.
    ///
    /// Fails without opening the region if `data` holds more fields than the
    /// marker declared.
    pub fn create_scoped_profiler_with_data(
        &self,
        marker: &MarkerDesc,
        data: &[EventData],
    ) -> Result<ScopedProfiler> {
        if data.len() > usize::from(marker.event_data_count()) {
            return Err(ProfilerError::TooManyEventData {
                marker: marker.name().to_owned(),
                declared: marker.event_data_count(),
                supplied: data.len(),
            });
        }
        Ok(ScopedProfiler::begin(
            Arc::clone(&self.profiler),
            marker.clone(),
            data,
        ))
    }

    /// Attribute timing to the `group_name`/`name` thread until the handle
    /// is dropped.
    pub fn create_scoped_profiler_thread(
        &self,
        group_name: &str,
        name: &str,
    ) -> ScopedProfilerThread {
        ScopedProfilerThread::begin(Arc::clone(&self.profiler), group_name, name)
    }

    /// Whether the host is currently capturing.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.profiler.is_enabled()
    }

    /// The host profiler this factory is bound to.
    #[must_use]
    pub fn profiler(&self) -> &Arc<dyn HostProfiler> {
        &self.profiler
    }
}

impl fmt::Debug for ProfilerMarkerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilerMarkerFactory")
            .field("enabled", &self.profiler.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_without_profiler_is_none() {
        assert!(ProfilerMarkerFactory::create(&HostInterfaces::new()).is_none());
    }

    #[test]
    fn create_ignores_unrelated_interfaces() {
        let interfaces = HostInterfaces::new().with(Arc::new(String::from("not a profiler")));
        assert!(ProfilerMarkerFactory::create(&interfaces).is_none());
    }
}
