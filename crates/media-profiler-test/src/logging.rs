//! Log routing and capture for tests.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

/// Route `tracing` output to the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A log event recorded by [`capture_logs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    /// Recorded fields, including `message`.
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Value of `name`, formatted as it was logged.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Run `f` with a subscriber that records every event emitted on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: Arc::clone(&events),
    });

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = std::mem::take(&mut *events.lock());
    (result, captured)
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldRecorder::default();
        event.record(&mut fields);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields: fields.0,
        });
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_level_and_fields() {
        let ((), events) = capture_logs(|| {
            tracing::error!(marker = "Encode", status = -2, "registration failed");
            tracing::info!("unrelated");
        });

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Level::ERROR);
        assert_eq!(events[0].field("marker"), Some("Encode"));
        assert_eq!(events[0].field("status"), Some("-2"));
        assert_eq!(events[0].field("message"), Some("registration failed"));
        assert_eq!(events[1].level, Level::INFO);
    }

    #[test]
    fn capture_is_scoped_to_the_closure() {
        let ((), inside) = capture_logs(|| tracing::warn!("inside"));
        tracing::warn!("outside");
        assert_eq!(inside.len(), 1);
    }
}
