//! Extension-based file classification.
//!
//! The category drives both the `Content-Type` of served files and the icon
//! shown in directory listings. A path whose final segment has no `.` at all
//! is treated as a directory. That is a naming heuristic, not a filesystem
//! fact: an extension-less regular file is reported as `Directory`, and a
//! directory with a dotted name is reported as a file.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Directory,
    Jpeg,
    Png,
    Txt,
    Json,
    Unknown,
}

impl FileType {
    /// Classify a request path (or any `/`-separated path) by its extension.
    pub fn classify(path: &str) -> Self {
        let segment = path.rsplit('/').next().unwrap_or_default();

        let Some(dot) = segment.rfind('.') else {
            return FileType::Directory;
        };

        match segment[dot + 1..].to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => FileType::Jpeg,
            "png" => FileType::Png,
            "txt" => FileType::Txt,
            "json" => FileType::Json,
            _ => FileType::Unknown,
        }
    }

    /// MIME type used when serving a file of this category.
    ///
    /// `Directory` never reaches the file responder through normal dispatch,
    /// so it shares the download fallback with `Unknown`.
    pub fn content_type(self) -> &'static str {
        match self {
            FileType::Jpeg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Txt => "text/plain",
            FileType::Json => "application/json",
            FileType::Directory | FileType::Unknown => "application/octet-stream",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            FileType::Directory => "directory",
            FileType::Jpeg => "jpeg",
            FileType::Png => "png",
            FileType::Txt => "txt",
            FileType::Json => "json",
            FileType::Unknown => "unknown",
        }
    }

    pub fn is_dir(self) -> bool {
        self == FileType::Directory
    }
}
