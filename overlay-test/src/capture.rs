//! Tracing utilities for asserting on diagnostic events.
//!
//! The decorating client reports through the `tracing` facade; this module
//! captures those events so tests can assert on the diagnostic channel
//! without installing a global subscriber.

use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Captured event information for testing.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// Event target (module path by default).
    pub target: String,
    /// Event level.
    pub level: tracing::Level,
    /// Captured field values as strings; the message is recorded under
    /// `message`.
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// The `message` field, if recorded.
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A tracing layer that captures events for testing.
pub struct EventCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor to capture event field values.
struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> Layer<S> for EventCaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor { fields: Vec::new() };
        event.record(&mut visitor);

        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            level: *event.metadata().level(),
            fields: visitor.fields,
        });
    }
}

/// Collector for captured events.
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    dispatch: Dispatch,
}

/// Create a new event collector with its associated dispatch.
///
/// Install the dispatch with `tracing::dispatcher::set_default` (or
/// [`with_event_capture`] for synchronous code) and inspect the collector
/// afterwards.
pub fn create_event_collector() -> EventCollector {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCaptureLayer {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(layer);
    let dispatch = Dispatch::new(subscriber);
    EventCollector { events, dispatch }
}

impl EventCollector {
    /// The dispatch to install while the code under test runs.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// All captured events.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Captured messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| event.message().map(String::from))
            .collect()
    }

    /// Get an event by message (returns the last occurrence).
    pub fn get_event(&self, message: &str) -> Option<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|event| event.message() == Some(message))
            .cloned()
    }

    /// Check if an event with the given message was captured.
    pub fn has_message(&self, message: &str) -> bool {
        self.get_event(message).is_some()
    }
}

/// Run a closure with event capturing enabled.
///
/// Returns the result of the closure and a collector with captured events.
pub fn with_event_capture<F, R>(f: F) -> (R, EventCollector)
where
    F: FnOnce() -> R,
{
    let collector = create_event_collector();
    let result = tracing::dispatcher::with_default(collector.dispatch(), f);
    (result, collector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_message_and_fields() {
        let ((), collector) = with_event_capture(|| {
            tracing::debug!(url = "https://example.com/", "HTTP request sent");
        });

        assert_eq!(collector.events().len(), 1);
        let event = collector.get_event("HTTP request sent").unwrap();
        assert_eq!(event.field("url"), Some("https://example.com/"));
        assert_eq!(event.level, tracing::Level::DEBUG);
    }

    #[test]
    fn messages_preserve_order() {
        let ((), collector) = with_event_capture(|| {
            tracing::debug!("first");
            tracing::debug!("second");
        });

        assert_eq!(collector.messages(), vec!["first", "second"]);
    }
}
