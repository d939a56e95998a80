use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ProofWriteError;

/// Serializes `value` as pretty JSON and writes it atomically: the payload
/// lands in `<path>.tmp`, is fsync'd, then renamed into place. Never writes
/// directly to `path` (spec.md §4.7 / §9's temp-then-rename discipline).
/// The rename gets one retry before surfacing [`ProofWriteError::Rename`].
pub fn write_atomic_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ProofWriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ProofWriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_vec_pretty(value).map_err(|source| ProofWriteError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = tmp_path_for(path);
    write_and_sync(&tmp_path, &json).map_err(|source| ProofWriteError::WriteTemp {
        path: tmp_path.clone(),
        source,
    })?;

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(_first) => match fs::rename(&tmp_path, path) {
            Ok(()) => Ok(()),
            Err(source) => Err(ProofWriteError::Rename {
                tmp_path,
                final_path: path.to_path_buf(),
                source,
            }),
        },
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(())
}
