//! Panchangam Core — shared types, error taxonomy, configuration, and the
//! observability seam used by every crate in the workspace.

pub mod config;
pub mod error;
pub mod festivals;
pub mod jd;
pub mod observer;
pub mod types;
pub mod zone;

pub use config::{InterpolationConfig, InterpolationMethod, PanchangamConfig};
pub use error::{BoundaryErrorCode, Category, PanchangamError, PanchangamResult, Severity};
pub use observer::{NoOpObserver, Observer, Span};
pub use types::*;
