//! Command-line argument definitions shared by the diagram generators.
//!
//! Both generators run without arguments. The optional flags choose where
//! the output goes, which formats are written, which configuration file is
//! loaded and how verbose logging is.

use std::path::PathBuf;

use clap::Parser;

use scaleviz::OutputFormat;

/// Command-line arguments for a diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the diagram is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format (png, svg, jpg, pdf, dot); repeat for several
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            formats: Vec::new(),
            config: None,
            log_level: "warn".to_string(),
        }
    }
}
