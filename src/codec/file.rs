//! File persistence
//!
//! Whole-file load and atomic whole-file replace.

use std::ffi::OsString;
use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{LineDbError, LoadSource, Result};

use super::decode;

/// Suffix of the sibling file a replace-write goes through
const TEMP_SUFFIX: &str = ".tmp";

/// Read and decode the backing file
pub fn load(path: &Path, separator: char) -> Result<Vec<String>> {
    let load_error = |source: LoadSource| LineDbError::Load {
        path: path.to_path_buf(),
        source,
    };

    let buf = fs::read(path).map_err(|e| load_error(e.into()))?;

    decode(&buf, separator).map_err(|e| load_error(e.into()))
}

/// Replace the backing file with `contents`
///
/// Steps:
/// 1. Resolve symlinks so the link's target is what gets replaced
/// 2. Refuse a read-only backing file
/// 3. Write `contents` to `<target>.tmp` with the original permissions
/// 4. fsync it (if `sync` says so)
/// 5. Rename it over the target
///
/// `<target>.tmp` is reserved: a file already there is overwritten.
/// On failure the backing file keeps its previous contents.
pub fn save(path: &Path, contents: &[u8], sync: SyncStrategy) -> Result<()> {
    replace(path, contents, sync).map_err(|source| LineDbError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of the temporary sibling used when replacing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

fn replace(path: &Path, contents: &[u8], sync: SyncStrategy) -> io::Result<()> {
    let target = resolve_target(path)?;
    let permissions = existing_permissions(&target)?;
    let tmp_path = temp_path(&target);

    let mut file = File::create(&tmp_path)?;

    let written = write_temp(&mut file, contents, sync, permissions);
    drop(file);

    let result = written.and_then(|()| fs::rename(&tmp_path, &target));

    if result.is_err() {
        // Only reached once we created the temp file ourselves
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    if sync == SyncStrategy::Always {
        sync_parent_dir(&target);
    }

    Ok(())
}

/// Follow symlinks to the file that actually holds the records
///
/// A missing backing file resolves to `path` itself and is recreated.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(target) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Permissions to carry over to the replacement file
///
/// A missing backing file is recreated with default permissions.
fn existing_permissions(path: &Path) -> io::Result<Option<Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => {
            let permissions = metadata.permissions();
            if permissions.readonly() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "backing file is read-only",
                ));
            }
            Ok(Some(permissions))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn write_temp(
    file: &mut File,
    contents: &[u8],
    sync: SyncStrategy,
    permissions: Option<Permissions>,
) -> io::Result<()> {
    file.write_all(contents)?;

    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }

    if sync == SyncStrategy::Always {
        file.sync_all()?;
    }

    Ok(())
}

/// fsync the directory so the rename itself is durable
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}
