//! Test support for media-profiler.
//!
//! Provides an in-memory host profiler that records every call it receives,
//! and helpers to route or capture `tracing` output in tests.

pub mod logging;
pub mod recording;

pub use logging::{capture_logs, init_test_logging, CapturedEvent};
pub use recording::{ProfilerEvent, RecordingProfiler};
