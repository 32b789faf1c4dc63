//! macOS application bundle (.app) creation.
//!
//! ```text
//! MyApp.app/
//! └── Contents/
//!     ├── info.plist          (only with an icon)
//!     ├── MacOS/
//!     │   └── run             (the script, extension stripped)
//!     └── Resources/          (only with an icon)
//!         └── logo.icns
//! ```

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::utils::fs;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the bundle metadata document inside `Contents/`.
pub const METADATA_FILE_NAME: &str = "info.plist";

/// Extension of the icon container written to `Contents/Resources/`.
pub const ICON_CONTAINER_EXTENSION: &str = "icns";

/// Key under which the icon file is recorded in the metadata document.
pub const ICON_FILE_KEY: &str = "CFBundleIconFile";

/// Paths inside an application bundle, derived from its root on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleLayout<'a> {
    root: &'a Path,
}

impl<'a> BundleLayout<'a> {
    /// Layout of the bundle rooted at `root` (e.g. `MyApp.app`).
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// `Contents/`
    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    /// `Contents/MacOS/`, where the launchable executable lives.
    pub fn executables_dir(&self) -> PathBuf {
        self.contents_dir().join("MacOS")
    }

    /// `Contents/Resources/`
    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// `Contents/info.plist`
    pub fn metadata_path(&self) -> PathBuf {
        self.contents_dir().join(METADATA_FILE_NAME)
    }

    /// Path of the executable called `name` inside `Contents/MacOS/`.
    pub fn executable_path(&self, name: &OsStr) -> PathBuf {
        self.executables_dir().join(name)
    }

    /// Path of the icon container called `file_name` inside `Contents/Resources/`.
    pub fn icon_path(&self, file_name: &str) -> PathBuf {
        self.resources_dir().join(file_name)
    }
}

/// Creates `Contents/MacOS` and copies `script` into it as `executable_name`.
///
/// Returns the path of the copied executable.
pub fn build_layout(layout: &BundleLayout<'_>, script: &Path, executable_name: &OsStr) -> Result<PathBuf> {
    let macos_dir = layout.executables_dir();
    std::fs::create_dir_all(&macos_dir).fs_context("creating MacOS directory", &macos_dir)?;

    let executable = layout.executable_path(executable_name);
    fs::copy_file(script, &executable)?;
    log::debug!("Copied {} to {}", script.display(), executable.display());

    Ok(executable)
}

/// Creates `Contents/Resources` and returns its path.
pub fn create_resources_dir(layout: &BundleLayout<'_>) -> Result<PathBuf> {
    let resources_dir = layout.resources_dir();
    std::fs::create_dir_all(&resources_dir)
        .fs_context("creating Resources directory", &resources_dir)?;
    Ok(resources_dir)
}

/// Writes `Contents/info.plist` pointing the bundle at its icon.
///
/// `icon_base_name` is the icon's file name without extension.
pub fn write_metadata(layout: &BundleLayout<'_>, icon_base_name: &str) -> Result<PathBuf> {
    use plist::Value;

    let mut dict = plist::Dictionary::new();
    dict.insert(ICON_FILE_KEY.into(), icon_base_name.into());

    let plist_path = layout.metadata_path();
    let mut content = Vec::new();
    Value::Dictionary(dict)
        .to_writer_xml(&mut content)
        .map_err(|e| Error::Io {
            context: "serializing",
            path: plist_path.clone(),
            error: io::Error::other(e.to_string()),
        })?;

    std::fs::write(&plist_path, content).fs_context("writing", &plist_path)?;
    log::debug!("Wrote {}", plist_path.display());

    Ok(plist_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let layout = BundleLayout::new(Path::new("out/MyApp.app"));
        assert_eq!(layout.executables_dir(), Path::new("out/MyApp.app/Contents/MacOS"));
        assert_eq!(layout.resources_dir(), Path::new("out/MyApp.app/Contents/Resources"));
        assert_eq!(layout.metadata_path(), Path::new("out/MyApp.app/Contents/info.plist"));
        assert_eq!(
            layout.executable_path(OsStr::new("run")),
            Path::new("out/MyApp.app/Contents/MacOS/run")
        );
        assert_eq!(
            layout.icon_path("logo.icns"),
            Path::new("out/MyApp.app/Contents/Resources/logo.icns")
        );
    }

    #[test]
    fn test_build_layout_copies_script() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("run.sh");
        std::fs::write(&script, "#!/bin/sh\necho hello\n").unwrap();

        let root = dir.path().join("MyApp.app");
        let layout = BundleLayout::new(&root);
        let executable = build_layout(&layout, &script, OsStr::new("run")).unwrap();

        assert_eq!(executable, root.join("Contents/MacOS/run"));
        assert_eq!(std::fs::read(&executable).unwrap(), std::fs::read(&script).unwrap());
        assert!(!layout.resources_dir().exists());
    }

    #[test]
    fn test_build_layout_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("run.sh");
        std::fs::write(&script, "echo").unwrap();
        let root = dir.path().join("MyApp.app");
        std::fs::write(&root, "not a directory").unwrap();

        let err = build_layout(&BundleLayout::new(&root), &script, OsStr::new("run")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_write_metadata() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("MyApp.app");
        let layout = BundleLayout::new(&root);
        std::fs::create_dir_all(layout.contents_dir()).unwrap();

        let path = write_metadata(&layout, "logo").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<key>CFBundleIconFile</key>"));
        assert!(content.contains("<string>logo</string>"));

        let value = plist::Value::from_file(&path).unwrap();
        let dict = value.as_dictionary().unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(ICON_FILE_KEY).and_then(|v| v.as_string()), Some("logo"));
    }

    #[test]
    fn test_write_metadata_without_contents_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Missing.app");
        let err = write_metadata(&BundleLayout::new(&root), "logo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
