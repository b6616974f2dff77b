//! CSV writing for cleaned listings.
//!
//! The frame is rendered in memory first, then written through a temp file
//! in the destination directory and renamed into place. A failed run never
//! leaves a partial file at the destination.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Render a frame as CSV bytes: header row, comma separated, no index.
pub fn render_csv(df: &mut DataFrame, path: &Path) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_separator(b',')
        .finish(df)
        .map_err(|e| OutputError::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(buffer)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}

/// Write bytes to `path` via temp file + rename.
pub fn write_atomic(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .map_err(|e| OutputError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        });
    if let Err(error) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(OutputError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }
    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

/// Write cleaned listings to `path` as CSV.
pub fn write_listings(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let bytes = render_csv(df, path)?;
    write_atomic(&bytes, path)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        "saved cleaned listings"
    );
    Ok(path.to_path_buf())
}
