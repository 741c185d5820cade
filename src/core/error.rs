//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::{color::ColorError, data::ParseCsvError};

/// Top-level error type bubbled up by public APIs.
///
/// Every variant is raised at the call that introduced the bad state; a call
/// that fails leaves the plot and its canvas untouched.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Structurally invalid configuration (bad symbol, wrong limits length, ...).
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Paired inputs of unequal length.
    #[error("dimension mismatch: {what} ({left} vs {right})")]
    DimensionMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    /// A value outside the domain of an axis scale.
    #[error("{value} is outside the domain of the {scale} scale")]
    Domain { value: f64, scale: &'static str },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] ParseCsvError),
}

impl PlotError {
    #[inline]
    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    #[inline]
    pub(crate) fn check_len(what: &'static str, left: usize, right: usize) -> Result<(), Self> {
        if left == right {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { what, left, right })
        }
    }
}
