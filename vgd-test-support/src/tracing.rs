//! Capture layer for asserting spans and events emitted during tests.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Structured fields keyed by name, rendered as strings.
pub type Fields = BTreeMap<String, String>;

/// Layer that keeps every closed span and every event for later assertions.
///
/// # Examples
/// ```
/// use tracing_subscriber::layer::SubscriberExt;
/// use vgd_test_support::tracing::CaptureLayer;
///
/// let layer = CaptureLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info!(count = 3, "hello");
/// });
/// let event = layer.event_with_message("hello").expect("event captured");
/// assert_eq!(event.fields.get("count").map(String::as_str), Some("3"));
/// ```
#[derive(Clone, Default)]
pub struct CaptureLayer {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// A span captured when it closed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedSpan {
    /// Span name.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Event target.
    pub target: String,
    /// Rendered `message` field, empty when absent.
    pub message: String,
    /// Remaining fields.
    pub fields: Fields,
}

impl CaptureLayer {
    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<CapturedSpan> {
        lock(&self.spans).clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// First closed span called `name`.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<CapturedSpan> {
        lock(&self.spans).iter().find(|span| span.name == name).cloned()
    }

    /// First event whose message equals `message`.
    #[must_use]
    pub fn event_with_message(&self, message: &str) -> Option<CapturedEvent> {
        lock(&self.events)
            .iter()
            .find(|event| event.message == message)
            .cloned()
    }

    /// Events at `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

// Test helper: a poisoned lock means an earlier assertion already failed.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut captured = CapturedSpan {
            name: attrs.metadata().name().to_owned(),
            fields: Fields::new(),
        };
        attrs.record(&mut FieldVisitor(&mut captured.fields));
        span.extensions_mut().insert(captured);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(captured) = extensions.get_mut::<CapturedSpan>() {
            values.record(&mut FieldVisitor(&mut captured.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        if let Some(captured) = span.extensions_mut().remove::<CapturedSpan>() {
            lock(&self.spans).push(captured);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldVisitor(&mut fields));
        let message = fields.remove("message").unwrap_or_default();
        lock(&self.events).push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            message,
            fields,
        });
    }
}

struct FieldVisitor<'a>(&'a mut Fields);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0.insert(field.name().to_owned(), value.to_string());
    }
}
