//! Media profiler demo.
//!
//! Simulates encoder workers instrumented through the marker factory and
//! reports what the host profiler received.

mod config;

use std::hint::black_box;
use std::panic;
use std::thread::{self, ScopedJoinHandle};

use media_profiler::{
    profile_thread, CategoryId, EventData, HostInterfaces, MarkerDesc, MarkerFlags,
    ProfilerMarkerFactory,
};
use media_profiler_test::RecordingProfiler;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

/// Factory plus the markers registered at startup.
struct Instrumentation {
    factory: ProfilerMarkerFactory,
    encode: MarkerDesc,
    packetize: MarkerDesc,
}

impl Instrumentation {
    fn new(factory: ProfilerMarkerFactory) -> media_profiler::Result<Self> {
        let encode = factory.create_marker(
            "VideoEncoder::Encode",
            CategoryId::VIDEO,
            MarkerFlags::empty(),
            0,
        )?;
        let packetize = factory.create_marker(
            "RtpSender::Packetize",
            CategoryId::NETWORK,
            MarkerFlags::VERBOSITY_DEBUG,
            1,
        )?;
        Ok(Self {
            factory,
            encode,
            packetize,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = DemoConfig::from_env()?;
    info!(?config, "Media profiler demo");

    let profiler = RecordingProfiler::shared();
    let interfaces = if config.host_profiler {
        profiler.registry()
    } else {
        HostInterfaces::new()
    };

    let instrumentation = ProfilerMarkerFactory::create(&interfaces)
        .map(Instrumentation::new)
        .transpose()?;
    if instrumentation.is_none() {
        info!("No host profiler, running uninstrumented");
    }

    let checksum = run_workers(instrumentation.as_ref(), &config);
    info!(checksum, "Workers finished");

    if let Some(instrumentation) = &instrumentation {
        info!(
            events = profiler.events().len(),
            encode_regions = profiler.begin_count(instrumentation.encode.handle()),
            packetize_regions = profiler.begin_count(instrumentation.packetize.handle()),
            open_regions = profiler.open_regions(),
            "Host profiler received"
        );
    }
    Ok(())
}

fn run_workers(instrumentation: Option<&Instrumentation>, config: &DemoConfig) -> u64 {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.workers);
        for worker in 0..config.workers {
            handles.push(scope.spawn(move || {
                profile_thread!(
                    instrumentation.map(|i| &i.factory),
                    "WebRTC",
                    &format!("Encoder {worker}")
                );
                (0..config.regions_per_worker)
                    .map(|frame| encode_frame(instrumentation, worker, frame))
                    .fold(0_u64, u64::wrapping_add)
            }));
        }
        handles
            .into_iter()
            .map(join_worker)
            .fold(0, u64::wrapping_add)
    })
}

/// Join a worker, re-raising its panic on the calling thread.
fn join_worker<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

fn encode_frame(instrumentation: Option<&Instrumentation>, worker: usize, frame: usize) -> u64 {
    let _encode = instrumentation.map(|i| i.factory.create_scoped_profiler(&i.encode));
    let checksum = (0..1024_u64).fold((worker * 31 + frame) as u64, |acc, byte| {
        black_box(acc.rotate_left(5) ^ byte)
    });

    let _packetize = instrumentation.and_then(|i| {
        i.factory
            .create_scoped_profiler_with_data(&i.packetize, &[EventData::U64(checksum)])
            .inspect_err(|error| warn!(%error, "Failed to open packetize region"))
            .ok()
    });
    checksum.rotate_left(7)
}
