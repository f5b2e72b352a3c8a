//! Writing rendered diagrams to disk.
//!
//! The DOT source produced by [`dot::DotBuilder`] is handed to an
//! [`Exporter`] per output format. Every exporter writes through a temporary
//! file in the destination directory that is then persisted over the target,
//! so a rerun replaces the previous output and a failed run leaves nothing
//! behind.

pub mod dot;

mod graphviz;
mod viewer;

pub use graphviz::GraphvizExporter;
pub use viewer::open_in_viewer;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::debug;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::options::OutputFormat;

/// Writes a diagram, given as DOT source, to a file.
pub trait Exporter {
    fn export(&self, dot_source: &str, path: &Path) -> Result<(), Error>;
}

/// Errors raised while writing output files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Graphviz failed to render {format}: {source}")]
    Graphviz {
        format: OutputFormat,
        source: io::Error,
    },

    #[error("failed to replace `{}`: {source}", path.display())]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
    },

    #[error("failed to open `{}` in a viewer: {source}", path.display())]
    Viewer { path: PathBuf, source: io::Error },
}

/// Writes the DOT source unchanged.
#[derive(Debug, Default)]
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export(&self, dot_source: &str, path: &Path) -> Result<(), Error> {
        write_atomically(path, dot_source.as_bytes())
    }
}

/// Returns the exporter producing `format`.
pub fn exporter_for(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Dot => Box::new(DotExporter),
        format => Box::new(GraphvizExporter::new(format)),
    }
}

/// Permissions of written files on Unix.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Replaces `path` with `bytes` via a temporary file in the same directory.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source: io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    #[cfg(unix)]
    {
        use std::{fs::Permissions, os::unix::fs::PermissionsExt};
        // NamedTempFile creates files with mode 0600.
        file.as_file()
            .set_permissions(Permissions::from_mode(OUTPUT_MODE))
            .map_err(io_error)?;
    }
    file.write_all(bytes).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(path).map_err(|source| Error::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = path.display().to_string(), bytes = bytes.len(); "File written");
    Ok(())
}
