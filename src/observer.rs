//! Hooks invoked while fields are being bound.

use tracing::{debug, trace};

use crate::bind::FieldDescriptor;

/// Why a field produced no bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The field's `ignored` tag parsed as true.
    Ignored,
    /// The field's type has no flag representation.
    Unsupported,
}

/// Receives progress notifications from the binding pass.
///
/// All methods default to doing nothing, so implementors pick what they need.
pub trait Observer {
    fn field_started(&self, _field: &str) {}

    fn field_skipped(&self, _field: &str, _reason: SkipReason) {}

    fn names_resolved(&self, _field: &FieldDescriptor) {}

    fn default_resolved(&self, _field: &FieldDescriptor) {}
}

/// Reports every step as a `tracing` event. Used unless another observer is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn field_started(&self, field: &str) {
        trace!(field, "processing field");
    }

    fn field_skipped(&self, field: &str, reason: SkipReason) {
        debug!(field, ?reason, "skipping field");
    }

    fn names_resolved(&self, field: &FieldDescriptor) {
        debug!(
            field = field.name,
            long = field.long.as_deref().unwrap_or(""),
            short = ?field.short,
            env = field.env.as_deref().unwrap_or(""),
            "resolved names"
        );
    }

    fn default_resolved(&self, field: &FieldDescriptor) {
        debug!(
            field = field.name,
            kind = %field.kind,
            raw = field.default_raw,
            value = %field.default,
            "resolved default"
        );
    }
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
