//! Forwards `tracing` events into a rotalog logger
//!
//! ```rust,ignore
//! use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::EnvFilter::new("info"))
//!     .with(rotalog::RotalogLayer::new())
//!     .init();
//! ```

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event as TracingEvent, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::global::{global, LoggerHandle};
use crate::level::Level;
use crate::logger::writing_record;

/// Layer sending every `tracing` event to the global logger (or to a given
/// handle). Events raised while the same thread is already writing a record
/// are dropped.
#[derive(Default)]
pub struct RotalogLayer {
    handle: Option<Arc<LoggerHandle>>,
}

impl RotalogLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(handle: Arc<LoggerHandle>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn handle(&self) -> &LoggerHandle {
        match &self.handle {
            Some(handle) => handle,
            None => global(),
        }
    }
}

impl<S> Layer<S> for RotalogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &TracingEvent<'_>, _ctx: Context<'_, S>) {
        if writing_record() {
            return;
        }

        let metadata = event.metadata();
        let level = Level::from(*metadata.level());

        let mut rotalog_event = self.handle().with_level(level);
        if !rotalog_event.enabled() {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        rotalog_event.add("target", metadata.target());
        for (key, value) in visitor.fields {
            rotalog_event.add(&key, value);
        }
        rotalog_event.msg(&visitor.message.unwrap_or_default());
    }
}

/// Collects the message and fields of a `tracing` event
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields
            .insert(field.name().to_string(), Value::String(value.to_string()));
    }
}
