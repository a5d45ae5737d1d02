//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a half-written config or
//! environment file behind on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::EnvputError;

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The destination is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), EnvputError> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    ensure_parent(path)?;

    let file = File::create(&temp_path)
        .map_err(|e| EnvputError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            EnvputError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        EnvputError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write pretty-printed JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), EnvputError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut contents = serde_json::to_vec_pretty(data)
        .map_err(|e| EnvputError::Config(format!("Failed to serialize data: {}", e)))?;
    contents.push(b'\n');
    write_atomic(path, &contents)
}

fn ensure_parent(path: &Path) -> Result<(), EnvputError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| {
                EnvputError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })
        }
        _ => Ok(()),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
