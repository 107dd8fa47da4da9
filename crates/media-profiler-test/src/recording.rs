//! In-memory host profiler.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use media_profiler::{
    CategoryId, EventData, HostInterfaces, HostProfiler, MarkerDesc, MarkerFlags, MarkerHandle,
    ProfilerThreadId,
};
use parking_lot::Mutex;

/// A call received by [`RecordingProfiler`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilerEvent {
    MarkerCreated {
        handle: MarkerHandle,
        name: String,
        category: CategoryId,
        flags: MarkerFlags,
        event_data_count: u16,
    },
    MarkerRejected {
        name: String,
        status: i32,
    },
    Begin {
        marker: MarkerHandle,
        data: Vec<EventData>,
        thread: ThreadId,
    },
    End {
        marker: MarkerHandle,
        thread: ThreadId,
    },
    ThreadRegistered {
        id: ProfilerThreadId,
        group_name: String,
        name: String,
        thread: ThreadId,
    },
    ThreadUnregistered {
        id: ProfilerThreadId,
        thread: ThreadId,
    },
}

/// Host profiler that records every call in order.
///
/// Marker handles and thread ids are issued sequentially starting at 1.
#[derive(Debug)]
pub struct RecordingProfiler {
    events: Mutex<Vec<ProfilerEvent>>,
    next_marker: AtomicU64,
    next_thread: AtomicU64,
    marker_status: AtomicI32,
    enabled: AtomicBool,
    available: AtomicBool,
}

impl Default for RecordingProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingProfiler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_marker: AtomicU64::new(1),
            next_thread: AtomicU64::new(1),
            marker_status: AtomicI32::new(0),
            enabled: AtomicBool::new(true),
            available: AtomicBool::new(true),
        }
    }

    /// Create a shared profiler.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Host interface registry exposing this profiler.
    #[must_use]
    pub fn registry(self: &Arc<Self>) -> HostInterfaces {
        let mut interfaces = HostInterfaces::new();
        interfaces.register_profiler(Arc::clone(self) as Arc<dyn HostProfiler>);
        interfaces
    }

    /// Reject marker registrations with `status` until reset with `0`.
    pub fn fail_markers_with(&self, status: i32) {
        self.marker_status.store(status, Ordering::Relaxed);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Snapshot of all recorded calls.
    #[must_use]
    pub fn events(&self) -> Vec<ProfilerEvent> {
        self.events.lock().clone()
    }

    /// Recorded calls made from `thread`.
    #[must_use]
    pub fn events_on(&self, thread: ThreadId) -> Vec<ProfilerEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.thread() == Some(thread))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Number of `begin_sample` calls for `marker`.
    #[must_use]
    pub fn begin_count(&self, marker: MarkerHandle) -> usize {
        self.count(|event| matches!(event, ProfilerEvent::Begin { marker: m, .. } if *m == marker))
    }

    /// Number of `end_sample` calls for `marker`.
    #[must_use]
    pub fn end_count(&self, marker: MarkerHandle) -> usize {
        self.count(|event| matches!(event, ProfilerEvent::End { marker: m, .. } if *m == marker))
    }

    /// Number of marker registrations accepted.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.count(|event| matches!(event, ProfilerEvent::MarkerCreated { .. }))
    }

    /// Regions begun but not yet ended, across all markers and threads.
    #[must_use]
    pub fn open_regions(&self) -> usize {
        let opened = self.count(ProfilerEvent::opens_region);
        let closed = self.count(ProfilerEvent::closes_region);
        opened.saturating_sub(closed)
    }

    fn count(&self, predicate: impl Fn(&ProfilerEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|&event| predicate(event)).count()
    }

    fn push(&self, event: ProfilerEvent) {
        self.events.lock().push(event);
    }
}

impl ProfilerEvent {
    /// OS thread the call was made from, for begin/end events.
    #[must_use]
    pub const fn thread(&self) -> Option<ThreadId> {
        match self {
            Self::Begin { thread, .. }
            | Self::End { thread, .. }
            | Self::ThreadRegistered { thread, .. }
            | Self::ThreadUnregistered { thread, .. } => Some(*thread),
            _ => None,
        }
    }

    /// Whether this call opens a timed region or thread attribution.
    #[must_use]
    pub const fn opens_region(&self) -> bool {
        matches!(self, Self::Begin { .. } | Self::ThreadRegistered { .. })
    }

    /// Whether this call closes a timed region or thread attribution.
    #[must_use]
    pub const fn closes_region(&self) -> bool {
        matches!(self, Self::End { .. } | Self::ThreadUnregistered { .. })
    }
}

impl HostProfiler for RecordingProfiler {
    fn create_marker(
        &self,
        name: &str,
        category: CategoryId,
        flags: MarkerFlags,
        event_data_count: u16,
    ) -> Result<MarkerHandle, i32> {
        let status = self.marker_status.load(Ordering::Relaxed);
        if status != 0 {
            tracing::debug!(marker = name, status, "Recording profiler rejecting marker");
            self.push(ProfilerEvent::MarkerRejected {
                name: name.to_owned(),
                status,
            });
            return Err(status);
        }

        let handle = MarkerHandle::new(self.next_marker.fetch_add(1, Ordering::Relaxed));
        self.push(ProfilerEvent::MarkerCreated {
            handle,
            name: name.to_owned(),
            category,
            flags,
            event_data_count,
        });
        Ok(handle)
    }

    fn begin_sample(&self, marker: &MarkerDesc, data: &[EventData]) {
        self.push(ProfilerEvent::Begin {
            marker: marker.handle(),
            data: data.to_vec(),
            thread: thread::current().id(),
        });
    }

    fn end_sample(&self, marker: &MarkerDesc) {
        self.push(ProfilerEvent::End {
            marker: marker.handle(),
            thread: thread::current().id(),
        });
    }

    fn register_thread(&self, group_name: &str, name: &str) -> ProfilerThreadId {
        let id = ProfilerThreadId::new(self.next_thread.fetch_add(1, Ordering::Relaxed));
        self.push(ProfilerEvent::ThreadRegistered {
            id,
            group_name: group_name.to_owned(),
            name: name.to_owned(),
            thread: thread::current().id(),
        });
        id
    }

    fn unregister_thread(&self, id: ProfilerThreadId) {
        self.push(ProfilerEvent::ThreadUnregistered {
            id,
            thread: thread::current().id(),
        });
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_sequential_marker_handles() {
        let profiler = RecordingProfiler::new();

        let first = profiler
            .create_marker("A", CategoryId::RENDER, MarkerFlags::empty(), 0)
            .unwrap();
        let second = profiler
            .create_marker("B", CategoryId::RENDER, MarkerFlags::empty(), 0)
            .unwrap();

        assert_eq!(first.raw(), 1);
        assert_eq!(second.raw(), 2);
        assert_eq!(profiler.marker_count(), 2);
    }

    #[test]
    fn rejects_markers_while_failing() {
        let profiler = RecordingProfiler::new();
        profiler.fail_markers_with(7);

        let result = profiler.create_marker("A", CategoryId::OTHER, MarkerFlags::empty(), 0);
        assert_eq!(result, Err(7));
        assert_eq!(profiler.marker_count(), 0);

        profiler.fail_markers_with(0);
        assert!(profiler
            .create_marker("A", CategoryId::OTHER, MarkerFlags::empty(), 0)
            .is_ok());
    }

    #[test]
    fn open_regions_counts_unbalanced_calls() {
        let profiler = RecordingProfiler::new();
        let first = profiler.register_thread("Group", "A");
        let _second = profiler.register_thread("Group", "B");
        assert_eq!(profiler.open_regions(), 2);

        profiler.unregister_thread(first);
        assert_eq!(profiler.open_regions(), 1);
    }

    #[test]
    fn registry_exposes_profiler() {
        let profiler = RecordingProfiler::shared();
        let interfaces = profiler.registry();
        assert!(interfaces.contains::<dyn HostProfiler>());

        let host = interfaces.get::<dyn HostProfiler>().unwrap();
        let thread = host.register_thread("Group", "Worker");
        host.unregister_thread(thread);

        assert_eq!(profiler.events().len(), 2);
        assert_eq!(profiler.open_regions(), 0);
    }

    #[test]
    fn enabled_flag_is_reported() {
        let profiler = RecordingProfiler::new();
        assert!(profiler.is_enabled());
        profiler.set_enabled(false);
        assert!(!profiler.is_enabled());
    }
}
