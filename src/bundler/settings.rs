//! Conversion request and its builder.
//!
//! A [`ConversionRequest`] names the script to wrap, where the `.app` bundle
//! goes and, optionally, which image to use as its icon. Requests are
//! immutable once built; bundle sub-paths are derived from them on demand.
//!
//! # Examples
//!
//! ```no_run
//! use script_bundler::bundler::ConversionRequest;
//!
//! let request = ConversionRequest::builder()
//!     .script("scripts/run.sh")
//!     .destination("MyApp.app")
//!     .icon("assets/logo.png")
//!     .build()?;
//!
//! assert_eq!(request.executable_name(), "run");
//! assert_eq!(request.icon().unwrap().container_file_name(), "logo.icns");
//! # Ok::<(), script_bundler::bundler::Error>(())
//! ```

use crate::bail;
use crate::bundler::error::Result;
use crate::bundler::platform::macos::app::{BundleLayout, ICON_CONTAINER_EXTENSION};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Icon image supplied for a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    path: PathBuf,
    base_name: String,
}

impl IconSpec {
    /// Describes the icon image at `path`.
    ///
    /// Fails with a configuration error when the path has no usable file stem.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let Some(base_name) = path.file_stem().and_then(OsStr::to_str) else {
            bail!("icon path {} has no UTF-8 file name", path.display());
        };
        let base_name = base_name.to_owned();
        Ok(Self { path, base_name })
    }

    /// Source image path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Icon file name without extension (`logo` for `assets/logo.png`).
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// File name of the icon container inside `Contents/Resources`.
    pub fn container_file_name(&self) -> String {
        format!("{}.{}", self.base_name, ICON_CONTAINER_EXTENSION)
    }
}

/// Everything needed to turn one script into one `.app` bundle.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    script: PathBuf,
    destination: PathBuf,
    icon: Option<IconSpec>,
    overwrite: bool,
    atomic: bool,
}

impl ConversionRequest {
    /// Starts building a request.
    pub fn builder() -> ConversionRequestBuilder {
        ConversionRequestBuilder::new()
    }

    /// Script to bundle.
    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Bundle root, e.g. `MyApp.app`.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Icon to embed, if any.
    pub fn icon(&self) -> Option<&IconSpec> {
        self.icon.as_ref()
    }

    /// Whether an existing bundle directory at the destination is replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Whether the bundle is staged and moved into place only on success.
    pub fn atomic(&self) -> bool {
        self.atomic
    }

    /// Name of the executable inside `Contents/MacOS`: the script's file name
    /// with its extension stripped.
    pub fn executable_name(&self) -> &OsStr {
        // validated non-empty by the builder
        self.script.file_stem().unwrap_or_default()
    }

    /// Layout of the destination bundle.
    pub fn layout(&self) -> BundleLayout<'_> {
        BundleLayout::new(&self.destination)
    }
}

/// Builder for [`ConversionRequest`].
#[derive(Debug, Default)]
pub struct ConversionRequestBuilder {
    script: Option<PathBuf>,
    destination: Option<PathBuf>,
    icon: Option<PathBuf>,
    overwrite: bool,
    atomic: bool,
}

impl ConversionRequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the script to bundle.
    ///
    /// # Required
    pub fn script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundle root to create.
    ///
    /// # Required
    pub fn destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the icon image.
    ///
    /// Default: no icon (no `Resources` directory, no `info.plist`)
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets or clears the icon image.
    pub fn icon_opt<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        self.icon = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Replace an existing bundle directory at the destination.
    ///
    /// Default: false
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Build into a staging directory and rename into place on success.
    ///
    /// Default: false (a failed run leaves the partial bundle on disk)
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - `script` or `destination` is missing or empty
    /// - the script or icon path has no file stem
    pub fn build(self) -> Result<ConversionRequest> {
        let script = match self.script {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => bail!("script path is required"),
        };
        let destination = match self.destination {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => bail!("destination path is required"),
        };
        if script.file_stem().is_none() {
            bail!("script path {} has no file name", script.display());
        }
        let icon = self.icon.map(IconSpec::new).transpose()?;

        Ok(ConversionRequest {
            script,
            destination,
            icon,
            overwrite: self.overwrite,
            atomic: self.atomic,
        })
    }
}
