//! The observability seam (C9).
//!
//! Every component accepts a `&dyn Observer`. The seam has no domain logic:
//! its only invariant is that a span opened in `X::method` ends before that
//! method returns, on every exit path (success, error, or panic). Concrete
//! backends (e.g. `tracing`) live in `panchangam-observability`; this crate
//! defines only the capability and a no-op implementation for call sites
//! that don't care.

use crate::error::PanchangamError;

/// A scoped span handle. Dropping it ends the span — this is what gives the
/// "ends deterministically on scope exit" guarantee on every code path,
/// including panics, without the caller having to remember to call `end()`.
pub trait Span {
    fn set_attribute(&mut self, key: &str, value: &str);
    fn add_event(&mut self, name: &str, fields: &[(&str, &str)]);
}

/// Write-only observability capability. No component may read spans back.
pub trait Observer: Send + Sync {
    fn span(&self, component: &str, operation: &str) -> Box<dyn Span>;
    fn record_error(&self, err: &PanchangamError);
    fn record_event(&self, name: &str, fields: &[(&str, &str)]);
}

struct NoOpSpan;

impl Span for NoOpSpan {
    fn set_attribute(&mut self, _key: &str, _value: &str) {}
    fn add_event(&mut self, _name: &str, _fields: &[(&str, &str)]) {}
}

/// Observer that does nothing — used in benchmarks and tests where span
/// overhead would skew timings, and as a safe default for call sites that
/// don't wire up a real backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl Observer for NoOpObserver {
    fn span(&self, _component: &str, _operation: &str) -> Box<dyn Span> {
        Box::new(NoOpSpan)
    }
    fn record_error(&self, _err: &PanchangamError) {}
    fn record_event(&self, _name: &str, _fields: &[(&str, &str)]) {}
}
