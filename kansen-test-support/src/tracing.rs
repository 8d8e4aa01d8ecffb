//! Recording layer for asserting spans and events emitted by kansen crates.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Layer that captures closed spans and emitted events for later assertions.
///
/// Clones share storage, so a test can keep one handle and hand another to
/// the subscriber.
///
/// # Examples
/// ```
/// use kansen_test_support::tracing::RecordingLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = RecordingLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info!(trials = 3, "run complete");
/// });
/// assert!(layer.has_event(tracing::Level::INFO, "run complete"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Returns the closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the emitted events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
        self.spans().into_iter().find(|span| span.name == name)
    }

    /// Returns the events whose `message` field equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.events()
            .into_iter()
            .filter(|event| event.message() == Some(message))
            .collect()
    }

    /// Returns whether an event with `message` was emitted at `level`.
    #[must_use]
    pub fn has_event(&self, level: Level, message: &str) -> bool {
        self.events_with_message(message)
            .iter()
            .any(|event| event.level == level)
    }
}

/// Closed span with its name and recorded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from the tracing metadata.
    pub name: String,
    /// Fields recorded at creation or later via `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the rendered value of `field`, if recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Emitted event with its level, target, and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Structured fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the formatted event message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the rendered value of `field`, if present.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

struct PendingSpan {
    name: &'static str,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut pending = PendingSpan {
            name: attrs.metadata().name(),
            fields: HashMap::new(),
        };
        attrs.record(&mut FieldCollector(&mut pending.fields));
        span.extensions_mut().insert(pending);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldCollector(&mut pending.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
            return;
        };
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SpanRecord {
                name: pending.name.to_owned(),
                fields: pending.fields,
            });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldCollector(&mut fields));
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                fields,
            });
    }
}

struct FieldCollector<'a>(&'a mut HashMap<String, String>);

impl FieldCollector<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldCollector<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}
