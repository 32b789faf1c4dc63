//! Script-to-`.app` bundler.
//!
//! Wraps a single executable script in a macOS application bundle, optionally
//! embedding an icon converted to ICNS.
//!
//! # Output
//!
//! | Path | Present |
//! |------|---------|
//! | `Contents/MacOS/<script-stem>` | always, owner-executable |
//! | `Contents/Resources/<icon-stem>.icns` | only with an icon |
//! | `Contents/info.plist` | only with an icon |
//!
//! # Integration
//!
//! ```no_run
//! use script_bundler::bundler::{create_app, ConversionRequest};
//!
//! let request = ConversionRequest::builder()
//!     .script("run.sh")
//!     .destination("MyApp.app")
//!     .icon("logo.png")
//!     .build()?;
//!
//! create_app(&request)?;
//! # Ok::<(), script_bundler::bundler::Error>(())
//! ```

#![warn(missing_docs)]

mod builder;
mod error;
pub(crate) mod platform;
mod resources;
mod settings;
mod utils;

// Public re-exports
pub use builder::{Converter, create_app};
pub use error::{Error, ErrorExt, ErrorKind, Result};
pub use platform::macos::{
    app::{
        BundleLayout, ICON_CONTAINER_EXTENSION, ICON_FILE_KEY, METADATA_FILE_NAME, build_layout,
        create_resources_dir, write_metadata,
    },
    icon::{IcnsCodec, normalize_icon},
};
pub use resources::icons::{CanonicalIconSize, IconArtifact, ImageCodec};
pub use settings::{ConversionRequest, ConversionRequestBuilder, IconSpec};
pub use utils::fs::make_executable;
