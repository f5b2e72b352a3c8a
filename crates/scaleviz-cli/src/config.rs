//! Configuration file loading for the generators
//!
//! Looks for a TOML configuration in an explicit path, the local project
//! directory or the platform configuration directory, in that order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use scaleviz::{ScalevizError, config::AppConfig};

/// Relative path of the project-local configuration file.
const LOCAL_CONFIG: &str = "scaleviz/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ScalevizError {
    fn from(err: ConfigError) -> Self {
        ScalevizError::Io(io::Error::other(err.to_string()))
    }
}

/// Loads the configuration for a generator run.
///
/// An explicit path must exist. Otherwise the first existing file among
/// [`search_paths`] is used, and the defaults apply when there is none.
///
/// # Errors
///
/// Returns error if the explicit file is missing, or if the chosen file
/// cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ScalevizError> {
    let path = match explicit_path {
        Some(path) => path.as_ref().to_path_buf(),
        None => match search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => path,
            None => {
                debug!("No configuration file found, using default configuration");
                return Ok(AppConfig::default());
            }
        },
    };

    info!(path = path.display().to_string(); "Loading configuration");
    let content = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ScalevizError::from(ConfigError::MissingFile(path.clone())),
        _ => ScalevizError::Io(err),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}

/// Implicit configuration locations, most specific first: the project-local
/// file, then the platform configuration directory.
fn search_paths() -> Vec<PathBuf> {
    let platform = ProjectDirs::from("com", "scaleviz", "scaleviz")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    std::iter::once(PathBuf::from(LOCAL_CONFIG))
        .chain(platform)
        .collect()
}
