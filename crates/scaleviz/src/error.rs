//! Error types for scaleviz operations.
//!
//! This module provides the main error type [`ScalevizError`] which wraps
//! the error conditions of declaring, validating and rendering a diagram.

use std::io;

use thiserror::Error;

use scaleviz_core::diagram::DuplicateIdError;

/// The main error type for scaleviz operations.
#[derive(Debug, Error)]
pub enum ScalevizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Export error: {0}")]
    Export(#[source] crate::export::Error),
}

impl From<crate::export::Error> for ScalevizError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(error)
    }
}
