//! Output persistence.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {temp_path} into place at {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sibling path used while writing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_temp(temp_path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    let io_error = |operation, source| PersistError::Io {
        operation,
        path: temp_path.to_path_buf(),
        source,
    };
    let mut file = File::create(temp_path).map_err(|e| io_error("create", e))?;
    file.write_all(contents).map_err(|e| io_error("write", e))?;
    file.sync_all().map_err(|e| io_error("sync", e))?;
    Ok(())
}

/// Write `contents` to `path` via a temp file and rename.
///
/// On failure the temp file is removed and an existing file at `path` is
/// left unchanged.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, contents).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| PersistError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    });
    if result.is_err() {
        // The temp file may not exist if creation failed.
        let _ = fs::remove_file(&temp_path);
    }
    result
}
