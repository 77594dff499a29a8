use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::{AppError, io_error, is_missing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub file_name: String,
}

pub fn resolve(root: &Path, identifier: &str) -> Result<ResolvedFile, AppError> {
    let base = canonicalize_lenient(root).map_err(|_| AppError::InvalidIdentifier)?;
    let requested =
        canonicalize_lenient(&base.join(identifier)).map_err(|_| AppError::InvalidIdentifier)?;

    if common_prefix(&base, &requested) != base {
        warn!(identifier, "rejected identifier outside files directory");
        return Err(AppError::InvalidIdentifier);
    }

    let metadata = match fs::metadata(&requested) {
        Ok(metadata) => metadata,
        Err(err) if is_missing(&err) => return Err(AppError::NotFound("File not found")),
        Err(err) => return Err(io_error(err)),
    };
    if !metadata.is_file() {
        return Err(AppError::NotAFile);
    }

    let file_name = requested
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(AppError::NotAFile)?;

    debug!(identifier, "resolved download");
    Ok(ResolvedFile {
        path: requested,
        file_name,
    })
}

pub fn common_prefix(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(left, right)| left == right)
        .map(|(left, _)| left)
        .collect()
}

/// Canonicalizes the longest existing prefix of `path` and normalizes the
/// missing remainder lexically. Errors other than "does not exist" are
/// returned as-is.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(canonical) => return Ok(canonical),
        Err(err) if !is_missing(&err) => return Err(err),
        Err(_) => {}
    }

    let absolute = std::path::absolute(path)?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => {
                resolved.push(segment);
                match fs::canonicalize(&resolved) {
                    Ok(canonical) => resolved = canonical,
                    Err(err) if is_missing(&err) => {}
                    Err(err) => return Err(err),
                }
            }
        }
    }
    Ok(resolved)
}
