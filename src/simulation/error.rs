//! Input-validation errors for the swarm core.
//!
//! Every variant is raised before the affected computation runs; nothing in
//! the numeric hot paths returns an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwarmError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("element/anchor count mismatch: {elements} elements, {anchors} anchors")]
    LengthMismatch { elements: usize, anchors: usize },
}

impl SwarmError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }

    /// `value` must be finite and > 0
    pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::invalid(name, value, "must be finite and > 0"))
        }
    }

    /// `value` must be finite and >= 0
    pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::invalid(name, value, "must be finite and >= 0"))
        }
    }

    pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid(name, value, "must be finite"))
        }
    }
}
