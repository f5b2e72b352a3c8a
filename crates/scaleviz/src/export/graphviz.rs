//! Rendering through the Graphviz `dot` binary.

use std::path::Path;

use graphviz_rust::{
    cmd::{CommandArg, Format, Layout},
    exec_dot,
};
use log::{debug, info};

use super::{Error, Exporter, write_atomically};
use crate::options::OutputFormat;

/// Runs `dot` to produce an image format.
#[derive(Debug, Clone, Copy)]
pub struct GraphvizExporter {
    format: OutputFormat,
}

impl GraphvizExporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn graphviz_format(&self) -> Format {
        match self.format {
            OutputFormat::Png => Format::Png,
            OutputFormat::Svg => Format::Svg,
            OutputFormat::Jpg => Format::Jpg,
            OutputFormat::Pdf => Format::Pdf,
            OutputFormat::Dot => Format::Dot,
        }
    }
}

impl Exporter for GraphvizExporter {
    fn export(&self, dot_source: &str, path: &Path) -> Result<(), Error> {
        info!(format = self.format.extension(); "Running Graphviz");
        let args = vec![
            CommandArg::Layout(Layout::Dot),
            CommandArg::Format(self.graphviz_format()),
        ];
        let rendered = exec_dot(dot_source.to_string(), args).map_err(|source| {
            Error::Graphviz {
                format: self.format,
                source,
            }
        })?;
        debug!(bytes = rendered.len(); "Graphviz finished");

        write_atomically(path, &rendered)
    }
}
