//! Copy, move and delete between the two panels.
//!
//! Every operation refuses to clobber an existing destination and returns `io::Result`, so the
//! caller can turn failures into a status line.

use crate::utils::copy_recursive;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn target_in(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid source: {}", src.display()),
        )
    })?;
    let target = dest_dir.join(name);
    if target.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Destination already exists: {}", name.to_string_lossy()),
        ));
    }
    Ok(target)
}

/// Copies `src` into `dest_dir`, recursing into directories. Returns the new path.
pub fn copy_entry(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let target = target_in(src, dest_dir)?;
    if src.is_dir() && target.starts_with(src) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Cannot copy a directory into itself",
        ));
    }
    copy_recursive(src, &target)?;
    log::info!("copied {} -> {}", src.display(), target.display());
    Ok(target)
}

/// Moves `src` into `dest_dir`. Falls back to copy and remove across filesystems.
/// Returns the new path.
pub fn move_entry(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let target = target_in(src, dest_dir)?;
    match fs::rename(src, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_recursive(src, &target)?;
            if src.is_dir() {
                fs::remove_dir_all(src)?;
            } else {
                fs::remove_file(src)?;
            }
        }
        Err(e) => return Err(e),
    }
    log::info!("moved {} -> {}", src.display(), target.display());
    Ok(target)
}

/// Deletes `path`. Without trash, a directory must be empty.
pub fn delete_entry(path: &Path, use_trash: bool) -> io::Result<()> {
    if use_trash {
        trash::delete(path).map_err(|e| io::Error::other(e.to_string()))?;
        log::info!("trashed {}", path.display());
        return Ok(());
    }

    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir(path)?;
    } else {
        fs::remove_file(path)?;
    }
    log::info!("deleted {}", path.display());
    Ok(())
}
