//! Marker descriptors, flags and per-region event data.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bitflags::bitflags;

use crate::category::CategoryId;

/// Host-issued identity of a registered marker.
///
/// Stable for the lifetime of the process once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Wrap the raw marker identity issued by the host.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identity as issued by the host.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Marker flags understood by the host profiler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MarkerFlags: u16 {
        /// Marker created by user script code.
        const SCRIPT_USER = 1 << 1;
        /// Only available in editor builds.
        const AVAILABILITY_EDITOR = 1 << 2;
        /// Available in non-development builds.
        const AVAILABILITY_NON_DEV = 1 << 3;
        /// Marks a warning-worthy region.
        const WARNING = 1 << 4;
        /// Script invocation marker.
        const SCRIPT_INVOKE = 1 << 5;
        /// Script enter/leave marker.
        const SCRIPT_ENTER_LEAVE = 1 << 6;
        /// Marker reports a counter value instead of a duration.
        const COUNTER = 1 << 7;
        /// Debug verbosity.
        const VERBOSITY_DEBUG = 1 << 10;
        /// Internal verbosity.
        const VERBOSITY_INTERNAL = 1 << 11;
        /// Advanced verbosity.
        const VERBOSITY_ADVANCED = 1 << 12;
    }
}

/// Descriptor of a registered marker.
///
/// Register each marker once and keep the descriptor around; cloning is cheap.
/// Two descriptors compare equal iff the host issued them the same handle.
#[derive(Debug, Clone)]
pub struct MarkerDesc {
    handle: MarkerHandle,
    name: Arc<str>,
    category: CategoryId,
    flags: MarkerFlags,
    event_data_count: u16,
}

impl MarkerDesc {
    pub(crate) fn new(
        handle: MarkerHandle,
        name: &str,
        category: CategoryId,
        flags: MarkerFlags,
        event_data_count: u16,
    ) -> Self {
        Self {
            handle,
            name: Arc::from(name),
            category,
            flags,
            event_data_count,
        }
    }

    /// Handle issued by the host at registration.
    #[inline]
    #[must_use]
    pub const fn handle(&self) -> MarkerHandle {
        self.handle
    }

    /// Name the marker was registered under.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn category(&self) -> CategoryId {
        self.category
    }

    #[inline]
    #[must_use]
    pub const fn flags(&self) -> MarkerFlags {
        self.flags
    }

    /// Maximum number of [`EventData`] fields a region may attach.
    #[inline]
    #[must_use]
    pub const fn event_data_count(&self) -> u16 {
        self.event_data_count
    }
}

impl PartialEq for MarkerDesc {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for MarkerDesc {}

impl Hash for MarkerDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

/// Metadata field attached to a single timed region.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
}

macro_rules! event_data_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for EventData {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

event_data_from! {
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
}

impl From<&str> for EventData {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
