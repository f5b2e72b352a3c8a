//! Opening rendered files in the platform viewer.

use std::{path::Path, process::Command};

use log::info;

use super::Error;

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Launches the platform viewer for `path` without waiting for it to exit.
pub fn open_in_viewer(path: &Path) -> Result<(), Error> {
    info!(path = path.display().to_string(); "Opening viewer");
    opener(path)
        .spawn()
        .map(drop)
        .map_err(|source| Error::Viewer {
            path: path.to_path_buf(),
            source,
        })
}
