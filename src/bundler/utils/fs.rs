//! File system utilities for bundling.
//!
//! Blocking helpers for permission bits, script copies and bundle cleanup.
//! All errors carry the path they concern.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{fs, io, path::Path};

/// Owner-execute permission bit (`S_IXUSR`).
#[cfg(unix)]
pub const OWNER_EXECUTE: u32 = 0o100;

/// Sets the owner-executable bit on `path`, leaving all other bits untouched.
///
/// Idempotent: when the bit is already present the permissions are not
/// rewritten. On non-Unix targets there is no execute bit, so only the
/// existence of the path is checked.
pub fn make_executable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|error| Error::Permission {
        path: path.to_path_buf(),
        error,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = metadata.permissions();
        let mode = permissions.mode();
        if mode & OWNER_EXECUTE != 0 {
            log::debug!("{} already executable ({:o})", path.display(), mode & 0o7777);
            return Ok(());
        }

        permissions.set_mode(mode | OWNER_EXECUTE);
        fs::set_permissions(path, permissions).map_err(|error| Error::Permission {
            path: path.to_path_buf(),
            error,
        })?;
        log::debug!(
            "Set owner-execute on {} ({:o} -> {:o})",
            path.display(),
            mode & 0o7777,
            (mode | OWNER_EXECUTE) & 0o7777
        );
    }

    #[cfg(not(unix))]
    let _ = metadata;

    Ok(())
}

/// Copies a regular file to a path that must not exist yet.
///
/// Fails if the source is missing or not a file, or if something already
/// occupies the destination. Permission bits travel with the copy.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from).fs_context("reading script", from)?;
    if !metadata.is_file() {
        return Err(Error::Io {
            context: "copying script",
            path: from.to_path_buf(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    if fs::symlink_metadata(to).is_ok() {
        return Err(Error::Io {
            context: "copying script to",
            path: to.to_path_buf(),
            error: io::Error::from(io::ErrorKind::AlreadyExists),
        });
    }
    fs::copy(from, to).fs_context("copying script to", to)?;
    Ok(())
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).fs_context("removing old app bundle", path)?;
    }
    Ok(())
}
