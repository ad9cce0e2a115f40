//! `tracing`-backed implementation of the `Observer` seam defined in
//! `panchangam-core`. A span opened here ends when the returned `Span`
//! guard drops — on the success path, an early return via `?`, or a panic —
//! by relying on `tracing::span::Entered`'s own `Drop` impl rather than
//! requiring callers to remember to close it themselves.

use panchangam_core::error::PanchangamError;
use panchangam_core::observer::{NoOpObserver, Observer, Span};
use tracing::field::display;

/// A `tracing` span entered for the lifetime of this guard.
pub struct TracingSpan {
    span: tracing::Span,
    _entered: tracing::span::EnteredSpan,
}

impl Span for TracingSpan {
    fn set_attribute(&mut self, key: &str, value: &str) {
        self.span.record(key, display(value));
    }

    fn add_event(&mut self, name: &str, fields: &[(&str, &str)]) {
        let joined = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::event!(parent: &self.span, tracing::Level::INFO, event = name, fields = %joined);
    }
}

/// Default `Observer` implementation, backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn span(&self, component: &str, operation: &str) -> Box<dyn Span> {
        let span = tracing::info_span!("panchangam", component = %component, operation = %operation);
        let entered = span.clone().entered();
        Box::new(TracingSpan {
            span,
            _entered: entered,
        })
    }

    fn record_error(&self, err: &PanchangamError) {
        tracing::error!(
            severity = %err.severity,
            category = ?err.category,
            component = %err.component,
            operation = %err.operation,
            retryable = err.retryable,
            "{}",
            err.message
        );
    }

    fn record_event(&self, name: &str, fields: &[(&str, &str)]) {
        let joined = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(event = name, fields = %joined);
    }
}

/// Re-exported so call sites that only need a stand-in (benches, tests)
/// don't have to depend on `panchangam-core` directly just for this.
pub type NoOpTracingObserver = NoOpObserver;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_guard_ends_on_drop() {
        let obs = TracingObserver;
        {
            let mut span = obs.span("geometry", "sunrise");
            span.set_attribute("lat", "40.71");
            span.add_event("computed", &[("hour_angle", "1.2")]);
        }
        // Dropping the guard above must not panic; a second span can open
        // cleanly afterward.
        let _span2 = obs.span("geometry", "sunset");
    }

    #[test]
    fn record_error_does_not_panic() {
        let obs = TracingObserver;
        let err = PanchangamError::internal("geometry", "sunrise", "end before start");
        obs.record_error(&err);
    }
}
