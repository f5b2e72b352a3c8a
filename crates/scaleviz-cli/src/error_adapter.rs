//! Error adapter for converting ScalevizError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's graphical report formatting used by the generators.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler};

use scaleviz::{ScalevizError, export};

/// Adapter giving each [`ScalevizError`] variant a diagnostic code and, where
/// the fix is known, a help message.
pub struct ErrorAdapter<'a>(pub &'a ScalevizError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ScalevizError::Io(_) => "scaleviz::io",
            ScalevizError::DuplicateId(_) => "scaleviz::duplicate_id",
            ScalevizError::Graph(_) => "scaleviz::graph",
            ScalevizError::Style(_) => "scaleviz::style",
            ScalevizError::Export(export::Error::Graphviz { .. }) => "scaleviz::export::graphviz",
            ScalevizError::Export(_) => "scaleviz::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ScalevizError::Export(export::Error::Graphviz { .. }) => {
                "install Graphviz so that the `dot` executable is on PATH, \
                 or write the `dot` format which needs no Graphviz"
            }
            ScalevizError::DuplicateId(_) => {
                "give the entity a different identifier, or let one be assigned"
            }
            ScalevizError::Style(_) => "use a CSS color name such as `blue` or a hex color",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Renders `err` as a graphical miette report.
pub fn render_report(err: &ScalevizError) -> String {
    let mut writer = String::new();
    let adapter = ErrorAdapter(err);
    if GraphicalReportHandler::new()
        .render_report(&mut writer, &adapter)
        .is_err()
    {
        return err.to_string();
    }
    writer
}
