//! RAII handles that bracket timed regions.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::host::{HostProfiler, ProfilerThreadId};
use crate::marker::{EventData, MarkerDesc};

/// Keeps scope handles on the thread that opened them.
type NotSend = PhantomData<*const ()>;

/// Open timed region for a single marker.
///
/// The region begins when the handle is created and ends when it is dropped,
/// whichever way the enclosing block is left.
#[must_use = "the region ends as soon as the handle is dropped"]
pub struct ScopedProfiler {
    profiler: Arc<dyn HostProfiler>,
    marker: MarkerDesc,
    _not_send: NotSend,
}

impl ScopedProfiler {
    pub(crate) fn begin(
        profiler: Arc<dyn HostProfiler>,
        marker: MarkerDesc,
        data: &[EventData],
    ) -> Self {
        profiler.begin_sample(&marker, data);
        Self {
            profiler,
            marker,
            _not_send: PhantomData,
        }
    }

    /// Marker this region was opened with.
    #[inline]
    #[must_use]
    pub const fn marker(&self) -> &MarkerDesc {
        &self.marker
    }
}

impl Drop for ScopedProfiler {
    #[inline]
    fn drop(&mut self) {
        self.profiler.end_sample(&self.marker);
    }
}

impl fmt::Debug for ScopedProfiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedProfiler")
            .field("marker", &self.marker.name())
            .finish_non_exhaustive()
    }
}

/// Open region attributed to a named profiler thread.
///
/// Used for work that runs on a worker other than the one that asked for the
/// measurement. The host attributes timing to `group_name`/`name` until the
/// handle is dropped.
#[must_use = "the thread registration ends as soon as the handle is dropped"]
pub struct ScopedProfilerThread {
    profiler: Arc<dyn HostProfiler>,
    thread_id: ProfilerThreadId,
    group_name: String,
    name: String,
    _not_send: NotSend,
}

impl ScopedProfilerThread {
    pub(crate) fn begin(profiler: Arc<dyn HostProfiler>, group_name: &str, name: &str) -> Self {
        let thread_id = profiler.register_thread(group_name, name);
        Self {
            profiler,
            thread_id,
            group_name: group_name.to_owned(),
            name: name.to_owned(),
            _not_send: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id the host issued when the region opened.
    #[inline]
    #[must_use]
    pub const fn thread_id(&self) -> ProfilerThreadId {
        self.thread_id
    }
}

impl Drop for ScopedProfilerThread {
    #[inline]
    fn drop(&mut self) {
        self.profiler.unregister_thread(self.thread_id);
    }
}

impl fmt::Debug for ScopedProfilerThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedProfilerThread")
            .field("group_name", &self.group_name)
            .field("name", &self.name)
            .field("thread_id", &self.thread_id)
            .finish_non_exhaustive()
    }
}
