use std::{fs, io, path::Path};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    error::{AppError, io_error, is_missing},
    models::files::FileEntry,
};

pub fn scan(root: &Path) -> Result<Vec<FileEntry>, AppError> {
    let root_meta = fs::metadata(root).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::NotFound("Files directory not found"),
        _ => io_error(err),
    })?;
    if !root_meta.is_dir() {
        return Err(AppError::NotADirectory);
    }

    let mut entries = Vec::new();
    for item in fs::read_dir(root).map_err(io_error)? {
        let item = item.map_err(io_error)?;
        // follows symlinks, so a link to a regular file is listed
        let metadata = match fs::metadata(item.path()) {
            Ok(metadata) => metadata,
            Err(err) if is_missing(&err) => continue,
            Err(err) => return Err(io_error(err)),
        };
        if !metadata.is_file() {
            continue;
        }

        // a lossy name could not be downloaded again
        let name = match item.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(name = ?raw, "skipping file with non UTF-8 name");
                continue;
            }
        };
        let created_at = created_at(&metadata).map_err(io_error)?;
        entries.push(FileEntry {
            id: name.clone(),
            name,
            size_bytes: metadata.len(),
            created_at,
        });
    }

    debug!(count = entries.len(), "scanned files directory");
    Ok(entries)
}

fn created_at(metadata: &fs::Metadata) -> io::Result<DateTime<Utc>> {
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}
