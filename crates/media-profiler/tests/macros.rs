use std::sync::Arc;

use media_profiler::{
    profile_marker, profile_thread, CategoryId, MarkerDesc, MarkerFlags, ProfilerMarkerFactory,
};
use media_profiler_test::{init_test_logging, RecordingProfiler};

fn setup() -> (Arc<RecordingProfiler>, ProfilerMarkerFactory, MarkerDesc) {
    init_test_logging();
    let profiler = RecordingProfiler::shared();
    let factory = ProfilerMarkerFactory::create(&profiler.registry()).unwrap();
    let marker = factory
        .create_marker("Encode", CategoryId::VIDEO, MarkerFlags::empty(), 0)
        .unwrap();
    profiler.clear();
    (profiler, factory, marker)
}

#[cfg(feature = "profiling")]
mod enabled {
    use media_profiler_test::ProfilerEvent;

    use super::*;

    fn encode(factory: Option<&ProfilerMarkerFactory>, marker: &MarkerDesc) -> usize {
        profile_marker!(factory, marker);
        profile_thread!(factory, "WebRTC", "Encoder");
        42
    }

    #[test]
    fn macros_bracket_the_enclosing_block() {
        let (profiler, factory, marker) = setup();

        assert_eq!(encode(Some(&factory), &marker), 42);

        let events = profiler.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], ProfilerEvent::Begin { .. }));
        assert!(matches!(events[1], ProfilerEvent::ThreadRegistered { .. }));
        assert!(matches!(
            events[2],
            ProfilerEvent::ThreadUnregistered { .. }
        ));
        assert!(matches!(events[3], ProfilerEvent::End { .. }));
    }

    #[test]
    fn macros_skip_absent_factory() {
        let (profiler, _factory, marker) = setup();

        assert_eq!(encode(None, &marker), 42);
        assert!(profiler.events().is_empty());
    }

    #[test]
    fn thread_scope_closes_each_iteration() {
        let (profiler, factory, _marker) = setup();

        for worker in 0..2 {
            let name = format!("Encoder {worker}");
            profile_thread!(Some(&factory), "WebRTC", &name);
        }

        let names: Vec<_> = profiler
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ProfilerEvent::ThreadRegistered { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["Encoder 0", "Encoder 1"]);
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use super::*;

    #[test]
    fn macros_expand_to_nothing() {
        let (profiler, factory, marker) = setup();

        {
            profile_marker!(Some(&factory), &marker);
            profile_thread!(Some(&factory), "WebRTC", "Encoder");
        }

        assert!(profiler.events().is_empty());
        assert!(factory.is_enabled());
        assert_eq!(marker.name(), "Encode");
    }
}
