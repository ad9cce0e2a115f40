//! Unified error taxonomy for the Panchangam astronomical core.
//!
//! Every error carries the (severity, category, operation, component) tuple
//! from the error-handling design; `retryable` and `expected` flags let the
//! Ephemeris Manager decide whether to fall through to a secondary provider
//! without inspecting error text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious the error is, independent of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// The four error categories named in the error-handling design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Bad caller input; never retried.
    Validation,
    /// Unrecoverable downstream arithmetic/lookup failure.
    Calculation,
    /// A provider-level failure (out of range, unavailable).
    Provider,
    /// An invariant violation. Always surfaced, never retried.
    Internal,
}

/// Main error type returned by every component in the workspace.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("{category:?} error in {component}::{operation}: {message}")]
pub struct PanchangamError {
    pub severity: Severity,
    pub category: Category,
    /// e.g. "positions", "sunrise", "compute_tithi"
    pub operation: String,
    /// e.g. "panchangam-ephemeris::PrimaryProvider"
    pub component: String,
    pub message: String,
    /// Whether the caller may retry (e.g. the root cause was a transient
    /// provider condition). `Validation`/`Internal` are never retryable.
    pub retryable: bool,
    /// Whether this error is an expected, documented outcome (e.g.
    /// `OutOfRange`) as opposed to a surprise.
    pub expected: bool,
    /// Free-form structured context (field name, valid range, JD, etc).
    #[serde(default)]
    pub extra: std::collections::BTreeMap<String, String>,
}

impl PanchangamError {
    pub fn validation(component: &str, operation: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category: Category::Validation,
            operation: operation.to_string(),
            component: component.to_string(),
            message: message.into(),
            retryable: false,
            expected: true,
            extra: Default::default(),
        }
    }

    pub fn out_of_range(component: &str, operation: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category: Category::Provider,
            operation: operation.to_string(),
            component: component.to_string(),
            message: message.into(),
            retryable: false,
            expected: true,
            extra: Default::default(),
        }
    }

    pub fn provider_unavailable(
        component: &str,
        operation: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            category: Category::Provider,
            operation: operation.to_string(),
            component: component.to_string(),
            message: message.into(),
            retryable: true,
            expected: true,
            extra: Default::default(),
        }
    }

    pub fn calculation(component: &str, operation: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category: Category::Calculation,
            operation: operation.to_string(),
            component: component.to_string(),
            message: message.into(),
            retryable: false,
            expected: false,
            extra: Default::default(),
        }
    }

    pub fn internal(component: &str, operation: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            category: Category::Internal,
            operation: operation.to_string(),
            component: component.to_string(),
            message: message.into(),
            retryable: false,
            expected: false,
            extra: Default::default(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

pub type PanchangamResult<T> = Result<T, PanchangamError>;

/// Boundary error codes exposed to external callers (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryErrorCode {
    InvalidArgument,
    OutOfRange,
    ProviderUnavailable,
    Internal,
}

impl From<&PanchangamError> for BoundaryErrorCode {
    fn from(err: &PanchangamError) -> Self {
        match err.category {
            Category::Validation => BoundaryErrorCode::InvalidArgument,
            Category::Internal => BoundaryErrorCode::Internal,
            Category::Provider => {
                if err.message.to_lowercase().contains("range") {
                    BoundaryErrorCode::OutOfRange
                } else {
                    BoundaryErrorCode::ProviderUnavailable
                }
            }
            Category::Calculation => BoundaryErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_not_retryable() {
        let e = PanchangamError::validation("core", "check_latitude", "out of range");
        assert!(!e.retryable);
        assert_eq!(e.category, Category::Validation);
    }

    #[test]
    fn internal_errors_are_critical_and_not_retryable() {
        let e = PanchangamError::internal("core", "normalize", "longitude out of [0,360)");
        assert_eq!(e.severity, Severity::Critical);
        assert!(!e.retryable);
    }

    #[test]
    fn boundary_code_maps_provider_out_of_range() {
        let e = PanchangamError::out_of_range("ephemeris", "positions", "jd out of range");
        let code: BoundaryErrorCode = (&e).into();
        assert_eq!(code, BoundaryErrorCode::OutOfRange);
    }

    #[test]
    fn boundary_code_maps_internal() {
        let e = PanchangamError::internal("geometry", "sunrise", "end before start");
        let code: BoundaryErrorCode = (&e).into();
        assert_eq!(code, BoundaryErrorCode::Internal);
    }
}
