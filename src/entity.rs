use std::fmt::Write;
use std::fs::Metadata;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::FileServerError;
use crate::filetype::FileType;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// A single file or directory under the browsing root, built per request.
///
/// `path` is always the normalized request path (`/` for the root,
/// `/sub/a.txt` below it) and never contains the absolute root directory.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub path: String,
    pub file_type: FileType,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Entity {}

impl Entity {
    /// Build an entity for an already normalized request path.
    pub fn new(path: impl Into<String>, metadata: Option<&Metadata>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let file_type = FileType::classify(&path);

        Self {
            name,
            path,
            file_type,
            size: metadata.map(Metadata::len),
            modified: metadata.and_then(|m| m.modified().ok()),
        }
    }

    /// Request path of a direct child of this entity.
    pub fn child_path(&self, child_name: &str) -> String {
        if self.path == "/" {
            format!("/{}", child_name)
        } else {
            format!("{}/{}", self.path, child_name)
        }
    }

    /// Request path of the parent directory, `None` at the browsing root.
    pub fn parent_path(&self) -> Option<String> {
        if self.path == "/" {
            return None;
        }
        match self.path.rfind('/') {
            Some(0) | None => Some("/".to_string()),
            Some(idx) => Some(self.path[..idx].to_string()),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    /// Human readable size; directories (and unknown sizes) show `-`.
    pub fn display_size(&self) -> String {
        match self.size {
            Some(size) if !self.is_dir() => format_size(size),
            _ => "-".to_string(),
        }
    }

    /// Local modification time rendered with a chrono strftime pattern.
    ///
    /// Empty when the time is unknown; an invalid pattern is a render error.
    pub fn display_modified(&self, format: &str) -> Result<String, FileServerError> {
        let Some(modified) = self.modified else {
            return Ok(String::new());
        };

        let datetime: DateTime<Local> = modified.into();
        let mut out = String::new();
        write!(out, "{}", datetime.format(format))
            .map_err(|_| FileServerError::Render(format!("invalid time format: {}", format)))?;
        Ok(out)
    }

    pub fn icon_path(&self, prefix: &str) -> String {
        format!(
            "{}/{}.svg",
            prefix.trim_end_matches('/'),
            self.file_type.icon_name()
        )
    }

    /// Name shown in listings; the root has no final segment.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "/"
        } else {
            &self.name
        }
    }
}

/// Format a byte count: `B` below 1 KiB, one-decimal `KB` below 1 MiB
/// (`.0` collapsed), whole `MB` below 1 GiB, whole `GB` above.
pub fn format_size(size: u64) -> String {
    if size < KIB {
        format!("{}B", size)
    } else if size < MIB {
        let kb = format!("{:.1}", size as f64 / KIB as f64);
        let kb = kb.strip_suffix(".0").unwrap_or(&kb);
        format!("{}KB", kb)
    } else if size < GIB {
        format!("{}MB", size / MIB)
    } else {
        format!("{}GB", size / GIB)
    }
}
