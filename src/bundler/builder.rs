//! Conversion orchestration.
//!
//! [`Converter`] runs the conversion steps in a fixed order:
//! 1. Make the source script owner-executable
//! 2. Create `Contents/MacOS` and copy the script into it
//! 3. If an icon was supplied: create `Contents/Resources`, normalize the icon
//!    into an ICNS file, then write `Contents/info.plist`
//!
//! The first failing step aborts the run and its error is returned unchanged.
//! Unless the request asks for atomic creation, whatever was created before
//! the failure stays on disk.
//!
//! # Example
//!
//! ```no_run
//! use script_bundler::bundler::{ConversionRequest, Converter};
//!
//! # fn example() -> script_bundler::bundler::Result<()> {
//! let request = ConversionRequest::builder()
//!     .script("run.sh")
//!     .destination("MyApp.app")
//!     .icon("logo.png")
//!     .build()?;
//!
//! Converter::new().create_app(&request)?;
//! # Ok(())
//! # }
//! ```

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::platform::macos::{
    app::{self, BundleLayout},
    icon::{self, IcnsCodec},
};
use crate::bundler::resources::icons::ImageCodec;
use crate::bundler::settings::ConversionRequest;
use crate::bundler::utils::fs;
use std::io;
use std::path::Path;

/// Turns conversion requests into `.app` bundles.
///
/// Stateless apart from its codec, so one converter can serve any number of
/// requests. Requests targeting the same destination must not run
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct Converter<C = IcnsCodec> {
    codec: C,
}

impl Converter<IcnsCodec> {
    /// Creates a converter using the default ICNS codec.
    pub fn new() -> Self {
        Self { codec: IcnsCodec }
    }
}

impl<C: ImageCodec> Converter<C> {
    /// Creates a converter using a custom imaging backend.
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// The imaging backend.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Creates the bundle described by `request`.
    pub fn create_app(&self, request: &ConversionRequest) -> Result<()> {
        let destination = request.destination();
        log::info!(
            "Bundling {} at {}",
            request.script().display(),
            destination.display()
        );

        fs::make_executable(request.script())?;

        if request.overwrite() && destination.is_dir() {
            log::info!("Removing old bundle {}", destination.display());
            fs::remove_dir_all(destination)?;
        }

        if request.atomic() {
            self.create_app_atomic(request)
        } else {
            self.populate(request, destination)
        }
    }

    /// Builds the bundle contents under `root`.
    fn populate(&self, request: &ConversionRequest, root: &Path) -> Result<()> {
        let layout = BundleLayout::new(root);

        let executable = app::build_layout(&layout, request.script(), request.executable_name())?;
        fs::make_executable(&executable)?;

        match request.icon() {
            Some(icon_spec) => {
                app::create_resources_dir(&layout)?;
                let icon_path = layout.icon_path(&icon_spec.container_file_name());
                icon::normalize_icon(&self.codec, icon_spec.path(), &icon_path)?;
                app::write_metadata(&layout, icon_spec.base_name())?;
            }
            None => log::debug!("No icon supplied; skipping Resources and info.plist"),
        }

        log::info!("Created {}", root.display());
        Ok(())
    }

    /// Builds into a sibling staging directory, then renames it onto the
    /// destination. The staging directory is removed if any step fails.
    ///
    /// The destination must not exist (after any overwrite removal); missing
    /// parent directories are created.
    fn create_app_atomic(&self, request: &ConversionRequest) -> Result<()> {
        let destination = request.destination();
        // the final rename cannot merge into or replace what is already there
        if std::fs::symlink_metadata(destination).is_ok() {
            return Err(Error::Io {
                context: "staging bundle for",
                path: destination.to_path_buf(),
                error: io::Error::from(io::ErrorKind::AlreadyExists),
            });
        }

        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).fs_context("creating destination parent", parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".script_bundler-")
            .tempdir_in(parent)
            .fs_context("creating staging directory in", parent)?;
        let staged_root = staging.path().join("bundle.app");
        log::debug!("Staging bundle in {}", staged_root.display());

        self.populate(request, &staged_root)?;

        std::fs::rename(&staged_root, destination)
            .fs_context("moving staged bundle to", destination)?;
        // staging (now empty) is removed on drop
        Ok(())
    }
}

/// Creates the bundle described by `request` with the default ICNS codec.
pub fn create_app(request: &ConversionRequest) -> Result<()> {
    Converter::new().create_app(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::ErrorKind;
    use crate::bundler::resources::icons::IconArtifact;
    use image::{DynamicImage, RgbaImage};
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Codec that records how it was driven and emits placeholder bytes.
    #[derive(Default)]
    struct RecordingCodec {
        decoded: Cell<bool>,
        resized_to: Cell<Option<(u32, u32)>>,
        encoded: Cell<Option<(u32, u32)>>,
    }

    impl ImageCodec for RecordingCodec {
        fn decode(&self, _bytes: &[u8]) -> Result<IconArtifact> {
            self.decoded.set(true);
            Ok(IconArtifact::new(DynamicImage::ImageRgba8(RgbaImage::new(64, 40))))
        }

        fn resize(&self, icon: IconArtifact, width: u32, height: u32) -> IconArtifact {
            self.resized_to.set(Some((width, height)));
            IcnsCodec.resize(icon, width, height)
        }

        fn encode_icon_container(&self, icon: IconArtifact) -> Result<Vec<u8>> {
            self.encoded.set(Some((icon.width(), icon.height())));
            Ok(b"icns".to_vec())
        }
    }

    fn write_script(dir: &Path) -> std::path::PathBuf {
        let script = dir.join("run.sh");
        std::fs::write(&script, "#!/bin/sh\necho hello\n").unwrap();
        script
    }

    #[test]
    fn test_converter_drives_injected_codec() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path());
        let icon = dir.path().join("logo.png");
        std::fs::write(&icon, "placeholder, decoded by the test codec").unwrap();

        let request = ConversionRequest::builder()
            .script(&script)
            .destination(dir.path().join("MyApp.app"))
            .icon(&icon)
            .build()
            .unwrap();

        let converter = Converter::with_codec(RecordingCodec::default());
        converter.create_app(&request).unwrap();

        assert_eq!(converter.codec().resized_to.get(), Some((256, 256)));
        assert_eq!(converter.codec().encoded.get(), Some((256, 256)));
        let icns = dir.path().join("MyApp.app/Contents/Resources/logo.icns");
        assert_eq!(std::fs::read(icns).unwrap(), b"icns");
    }

    #[test]
    fn test_atomic_failure_leaves_no_bundle() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path());
        let icon = dir.path().join("logo.png");
        std::fs::write(&icon, "not an image").unwrap();
        let destination = dir.path().join("MyApp.app");

        let request = ConversionRequest::builder()
            .script(&script)
            .destination(&destination)
            .icon(&icon)
            .atomic(true)
            .build()
            .unwrap();

        let err = create_app(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageDecode);
        assert!(!destination.exists());

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".script_bundler-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_atomic_rejects_existing_file_before_icon_work() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path());
        let icon = dir.path().join("logo.png");
        std::fs::write(&icon, "placeholder, decoded by the test codec").unwrap();
        let destination = dir.path().join("MyApp.app");
        std::fs::write(&destination, "occupied").unwrap();

        let request = ConversionRequest::builder()
            .script(&script)
            .destination(&destination)
            .icon(&icon)
            .atomic(true)
            .build()
            .unwrap();

        let converter = Converter::with_codec(RecordingCodec::default());
        let err = converter.create_app(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!converter.codec().decoded.get());
        assert_eq!(converter.codec().encoded.get(), None);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "occupied");
    }

    #[test]
    fn test_atomic_creates_missing_parents() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path());
        let destination = dir.path().join("out/sub/MyApp.app");

        let request = ConversionRequest::builder()
            .script(&script)
            .destination(&destination)
            .atomic(true)
            .build()
            .unwrap();

        create_app(&request).unwrap();
        assert!(destination.join("Contents/MacOS/run").is_file());
        assert!(!destination.join("Contents/Resources").exists());
    }

    #[test]
    fn test_non_atomic_failure_keeps_partial_bundle() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path());
        let icon = dir.path().join("logo.png");
        std::fs::write(&icon, "not an image").unwrap();
        let destination = dir.path().join("MyApp.app");

        let request = ConversionRequest::builder()
            .script(&script)
            .destination(&destination)
            .icon(&icon)
            .build()
            .unwrap();

        let err = create_app(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageDecode);
        assert!(destination.join("Contents/MacOS/run").is_file());
        assert!(!destination.join("Contents/info.plist").exists());
    }
}
