//! Host profiler instrumentation for the media engine.
//!
//! Transport, codec and session code register named markers with the host
//! profiler and bracket timed regions with RAII handles, without knowing
//! whether a profiler is present.
//!
//! # Feature Flags
//!
//! - `profiling`: Enable the [`profile_marker!`] and [`profile_thread!`]
//!   macros. When disabled, they expand to no-ops for zero overhead.
//!
//! # Usage
//!
//! Resolve the factory once, when the host hands over its interfaces:
//!
//! ```ignore
//! let factory = media_profiler::ProfilerMarkerFactory::create(&interfaces);
//! ```
//!
//! `None` means the host has no profiler and instrumentation is skipped.
//! Register markers once and open a region per measurement:
//!
//! ```ignore
//! use media_profiler::{CategoryId, MarkerFlags};
//!
//! let encode = factory.create_marker("Encode", CategoryId::VIDEO, MarkerFlags::empty(), 0)?;
//! {
//!     let _region = factory.create_scoped_profiler(&encode);
//!     // ... encode a frame
//! } // region ends here
//! ```

mod category;
mod error;
mod factory;
mod host;
#[doc(hidden)]
pub mod macros;
mod marker;
mod scope;

pub use category::CategoryId;
pub use error::{ProfilerError, Result};
pub use factory::ProfilerMarkerFactory;
pub use host::{HostInterfaces, HostProfiler, ProfilerThreadId};
pub use marker::{EventData, MarkerDesc, MarkerFlags, MarkerHandle};
pub use scope::{ScopedProfiler, ScopedProfilerThread};
