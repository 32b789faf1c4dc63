//! Command line interface for script_bundler.
//!
//! Parses arguments into a [`ConversionRequest`](crate::bundler::ConversionRequest)
//! and runs the conversion on the blocking thread pool.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{self, ErrorKind};
use anyhow::Context;

/// Exit code for a malformed request.
pub const EXIT_USAGE: i32 = 2;

/// Main CLI entry point
pub async fn run() -> anyhow::Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Runs a conversion for already-parsed arguments and returns the exit code.
pub async fn execute(args: Args) -> anyhow::Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);

    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(EXIT_USAGE);
        }
    };

    output.verbose(&format!(
        "Bundling {} into {}",
        request.script().display(),
        request.destination().display()
    ));
    if let Some(icon) = request.icon() {
        output.verbose(&format!("Icon: {}", icon.path().display()));
    }

    let destination = request.destination().to_path_buf();
    let icon_file = request.icon().map(|icon| icon.container_file_name());

    let result = tokio::task::spawn_blocking(move || bundler::create_app(&request))
        .await
        .context("bundling task failed")?;

    match result {
        Ok(()) => {
            output.success(&format!("Created {}", destination.display()));
            if let Some(icon_file) = icon_file {
                output.indent(&format!("icon: Contents/Resources/{}", icon_file));
            }
            Ok(0)
        }
        Err(e) => {
            output.error(&e.to_string());
            if e.kind() == ErrorKind::Configuration {
                Ok(EXIT_USAGE)
            } else {
                Ok(1)
            }
        }
    }
}
