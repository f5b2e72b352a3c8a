//! CLI logic for the scaleviz diagram generators.
//!
//! Each binary picks a [`diagrams::Generator`] and hands it to [`main`],
//! which parses arguments, sets up logging, renders the diagram and prints
//! the completion line.

pub mod diagrams;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use scaleviz::{DiagramContext, RenderOutput, ScalevizError};

use diagrams::Generator;

/// Render `generator` with the given arguments.
///
/// Options are resolved in order: the generator's own options, then the
/// configuration file, then the command line.
///
/// # Errors
///
/// Returns `ScalevizError` for:
/// - Configuration loading errors
/// - Declaration and structural errors
/// - File I/O errors
/// - Graphviz failures
pub fn run(args: &Args, generator: &dyn Generator) -> Result<RenderOutput, ScalevizError> {
    info!(
        diagram = generator.purpose(),
        output_dir = args.output_dir.display().to_string();
        "Generating diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let options = generator
        .options()
        .with_config(&app_config)
        .with_output_dir(&args.output_dir)
        .with_formats(args.formats.iter().copied());
    debug!(options:?; "Resolved diagram options");

    DiagramContext::new(options).render(|scope| generator.declare(scope))
}

/// The line printed once a diagram has been written.
pub fn completion_message(purpose: &str, output: &RenderOutput) -> String {
    let file_name = output
        .primary()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("✅ {purpose} diagram generated: {file_name}")
}

/// Entry point shared by the generator binaries.
pub fn main(generator: &dyn Generator) {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting scaleviz");
    debug!(args:?; "Parsed arguments");

    match run(&args, generator) {
        Ok(output) => {
            println!("{}", completion_message(generator.purpose(), &output));
            info!("Completed successfully");
        }
        Err(err) => {
            eprintln!("{}", error_adapter::render_report(&err));
            process::exit(1);
        }
    }
}
