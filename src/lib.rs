//! # Script Bundler
//!
//! Turns an executable script into a double-clickable macOS `.app` bundle.
//!
//! ## Features
//!
//! - **Bundle skeleton**: `Contents/MacOS` with an owner-executable copy of the script
//! - **Icon conversion**: any common raster image, normalized to a canonical
//!   square size and encoded as ICNS
//! - **Metadata**: a minimal `info.plist` pointing at the icon
//! - **Atomic mode**: optionally stage the bundle and move it into place only on success
//!
//! ## Usage
//!
//! ```bash
//! script_bundler run.sh MyApp.app
//! script_bundler run.sh MyApp.app --icon logo.png
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;

// Re-export main types for public API
pub use bundler::{ConversionRequest, Converter, Error, ErrorKind, Result, create_app};
pub use cli::Args;
