//! Host interface registry and the profiler capability it may expose.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::category::CategoryId;
use crate::marker::{EventData, MarkerDesc, MarkerFlags, MarkerHandle};

/// Host-issued identity of a registered profiler thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfilerThreadId(u64);

impl ProfilerThreadId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Profiling capability a host may expose through [`HostInterfaces`].
///
/// Implementations must tolerate concurrent calls from any thread. Begin and
/// end calls for one region always arrive on the same thread.
pub trait HostProfiler: Send + Sync {
    /// Register a marker. `Err` carries the host's nonzero status.
    fn create_marker(
        &self,
        name: &str,
        category: CategoryId,
        flags: MarkerFlags,
        event_data_count: u16,
    ) -> Result<MarkerHandle, i32>;

    /// Register a category. `Err` carries the host's nonzero status.
    ///
    /// Hosts without category registration keep the default, which rejects
    /// every request with status `-1`.
    fn create_category(&self, name: &str, color: u32) -> Result<CategoryId, i32> {
        let _ = (name, color);
        Err(-1)
    }

    /// Open a timed region for `marker`.
    fn begin_sample(&self, marker: &MarkerDesc, data: &[EventData]);

    /// Close the innermost region opened for `marker` on this thread.
    fn end_sample(&self, marker: &MarkerDesc);

    /// Attribute subsequent timing on this thread to `group_name`/`name`.
    fn register_thread(&self, group_name: &str, name: &str) -> ProfilerThreadId;

    /// Undo a previous [`register_thread`](Self::register_thread).
    fn unregister_thread(&self, thread: ProfilerThreadId);

    /// Whether the host is currently capturing.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Whether the host profiler is available in this build of the host.
    fn is_available(&self) -> bool {
        true
    }
}

/// Type-keyed registry of capabilities exposed by the host.
///
/// Interfaces are keyed by their (possibly unsized) type, so a profiler is
/// registered and looked up as `dyn HostProfiler`.
#[derive(Default)]
pub struct HostInterfaces {
    interfaces: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl HostInterfaces {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `interface`, replacing any previous entry of the same type.
    pub fn register<I>(&mut self, interface: Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.interfaces
            .insert(TypeId::of::<I>(), Box::new(interface));
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<I>(mut self, interface: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.register(interface);
        self
    }

    /// Register the host profiler capability.
    pub fn register_profiler(&mut self, profiler: Arc<dyn HostProfiler>) -> &mut Self {
        self.register::<dyn HostProfiler>(profiler)
    }

    /// Look up an interface by type.
    #[must_use]
    pub fn get<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.interfaces
            .get(&TypeId::of::<I>())?
            .downcast_ref::<Arc<I>>()
            .cloned()
    }

    #[must_use]
    pub fn contains<I>(&self) -> bool
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.interfaces.contains_key(&TypeId::of::<I>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl fmt::Debug for HostInterfaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostInterfaces")
            .field("interfaces", &self.interfaces.len())
            .finish()
    }
}
