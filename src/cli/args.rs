//! Command line argument parsing.

use crate::bundler::{ConversionRequest, Result};
use clap::Parser;
use std::path::PathBuf;

/// Wrap a script in a double-clickable macOS application bundle
#[derive(Parser, Debug)]
#[command(
    name = "script_bundler",
    version,
    about = "Wrap a script in a double-clickable macOS application bundle",
    long_about = "Create a .app bundle that launches the given script.

Usage:
  script_bundler run.sh MyApp.app
  script_bundler run.sh MyApp.app --icon logo.png
  script_bundler run.sh MyApp.app --icon logo.png --force --atomic"
)]
pub struct Args {
    /// Script to bundle (copied to Contents/MacOS without its extension)
    #[arg(index = 1, value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Bundle to create, e.g. MyApp.app
    #[arg(index = 2, value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Image to convert into the bundle icon (any common raster format)
    #[arg(short, long, value_name = "IMAGE")]
    pub icon: Option<PathBuf>,

    /// Replace an existing bundle at DESTINATION
    #[arg(short, long)]
    pub force: bool,

    /// Build in a staging directory and only move the bundle into place on success
    #[arg(long)]
    pub atomic: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print each step
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Turns the arguments into a conversion request.
    pub fn to_request(&self) -> Result<ConversionRequest> {
        ConversionRequest::builder()
            .script(&self.script)
            .destination(&self.destination)
            .icon_opt(self.icon.as_ref())
            .overwrite(self.force)
            .atomic(self.atomic)
            .build()
    }
}
