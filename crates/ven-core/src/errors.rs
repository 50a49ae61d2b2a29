//! Structured error types shared across the ven crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`VenError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (bounds, shapes, indices, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the ven workspace.
///
/// Soft conditions are deliberately absent: a not-guaranteed result carries
/// the NG flag on the value itself, and an unverifiable linear-algebra result
/// is returned as an all-NaI matrix rather than an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum VenError {
    /// Interval constructor given unusable bounds.
    #[error("invalid bounds: {0}")]
    InvalidBounds(ErrorInfo),
    /// Linear-algebra shape violation.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(ErrorInfo),
    /// Real-valued function evaluated outside its mathematical domain.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
}

impl VenError {
    /// Returns the structured payload carried by the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VenError::InvalidBounds(info) => info,
            VenError::DimensionMismatch(info) => info,
            VenError::Domain(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
