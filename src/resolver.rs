use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::FileServerError;

/// Decode and normalize a raw URI path into the rooted request path.
///
/// Segments are split on `/`, empty and `.` segments are dropped and `..`
/// removes the previous segment without ever climbing above the root. The
/// result always starts with `/` and has no trailing slash, so `/a.txt/`
/// classifies and serves exactly like `/a.txt`.
pub fn normalize_request_path(raw: &str) -> Result<String, FileServerError> {
    let decoded = urlencoding::decode(raw).map_err(|_| {
        warn!("Request path is not valid UTF-8 after decoding: {}", raw);
        FileServerError::NotFound(raw.to_string())
    })?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            name => {
                if name.contains('\0') {
                    warn!("Rejected path segment: {:?}", name);
                    return Err(FileServerError::NotFound(raw.to_string()));
                }
                segments.push(name);
            }
        }
    }

    Ok(format!("/{}", segments.join("/")))
}

/// Filesystem location of a normalized request path under `root`.
pub fn to_fs_path(root: &Path, request_path: &str) -> PathBuf {
    let mut result = root.to_path_buf();
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        result.push(segment);
    }
    result
}

/// Resolve a request path to an entity, or `NotFound` if nothing exists there.
///
/// Any stat failure other than absence is returned as an I/O error.
pub async fn resolve(root: &Path, raw_path: &str) -> Result<Entity, FileServerError> {
    let request_path = normalize_request_path(raw_path)?;
    let full_path = to_fs_path(root, &request_path);

    debug!("Resolving {} -> {}", request_path, full_path.display());

    match fs::metadata(&full_path).await {
        Ok(metadata) => Ok(Entity::new(request_path, Some(&metadata))),
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Err(FileServerError::NotFound(request_path))
        }
        Err(err) => Err(FileServerError::Io(err)),
    }
}
