//! Directory listing: child enumeration and HTML rendering.

use std::io::ErrorKind;
use std::path::Path;

use maud::{html, DOCTYPE};
use tokio::fs;
use tracing::{debug, warn};

use crate::config::Config;
use crate::entity::Entity;
use crate::error::FileServerError;
use crate::filetype::FileType;
use crate::resolver::to_fs_path;

/// Data handed to a [`ListingRenderer`] for one directory page.
#[derive(Debug)]
pub struct ListingContext<'a> {
    /// The directory being listed
    pub entity: &'a Entity,
    /// Its immediate children, sorted by name
    pub entities: &'a [Entity],
    pub title: &'a str,
    pub icon_prefix: &'a str,
    pub time_format: &'a str,
}

impl<'a> ListingContext<'a> {
    pub fn new(entity: &'a Entity, entities: &'a [Entity], config: &'a Config) -> Self {
        Self {
            entity,
            entities,
            title: &config.title,
            icon_prefix: &config.icon_prefix,
            time_format: &config.time_format,
        }
    }
}

/// Turns a listing context into an HTML document.
pub trait ListingRenderer: Send + Sync {
    fn render(&self, ctx: &ListingContext<'_>) -> Result<String, FileServerError>;
}

/// Built-in listing page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl ListingRenderer for HtmlRenderer {
    fn render(&self, ctx: &ListingContext<'_>) -> Result<String, FileServerError> {
        let heading = format!("{} {}", ctx.title, ctx.entity.path);
        let rows = ctx
            .entities
            .iter()
            .map(|child| child.display_modified(ctx.time_format).map(|modified| (child, modified)))
            .collect::<Result<Vec<_>, FileServerError>>()?;
        let dir_icon = format!(
            "{}/{}.svg",
            ctx.icon_prefix.trim_end_matches('/'),
            FileType::Directory.icon_name()
        );

        let markup = html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="utf-8";
                    title { (heading) }
                }
                body {
                    h1 { (heading) }
                    table {
                        thead {
                            tr {
                                th {}
                                th { "Name" }
                                th { "Size" }
                                th { "Modified" }
                            }
                        }
                        tbody {
                            @if let Some(parent) = ctx.entity.parent_path() {
                                tr class="parent" {
                                    td { img src=(dir_icon) alt="directory"; }
                                    td { a href=(encode_href(&parent)) { ".." } }
                                    td { "-" }
                                    td {}
                                }
                            }
                            @for (child, modified) in &rows {
                                tr class=(if child.is_dir() { "dir" } else { "file" }) {
                                    td {
                                        img src=(child.icon_path(ctx.icon_prefix))
                                            alt=(child.file_type.icon_name());
                                    }
                                    td { a href=(encode_href(&child.path)) { (child.display_name()) } }
                                    td { (child.display_size()) }
                                    td { (modified) }
                                }
                            }
                        }
                    }
                }
            }
        };

        Ok(markup.into_string())
    }
}

/// Percent-encode each segment of a request path for use as an href.
pub fn encode_href(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read the immediate children of a directory entity.
///
/// Children come back sorted by name. Entries whose names are not valid
/// UTF-8 cannot be addressed by a request path and are skipped.
pub async fn read_children(root: &Path, entity: &Entity) -> Result<Vec<Entity>, FileServerError> {
    let dir_path = to_fs_path(root, &entity.path);
    let mut entries = fs::read_dir(&dir_path).await?;
    let mut children = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            warn!(
                "Skipping entry with non-UTF8 filename in {}",
                dir_path.display()
            );
            continue;
        };

        // Follow symlinks like the resolver does; dangling links fall back
        // to the link itself.
        let metadata = match fs::metadata(entry.path()).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => entry.metadata().await?,
            Err(err) => return Err(err.into()),
        };

        children.push(Entity::new(entity.child_path(&name), Some(&metadata)));
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Listed {} entries in {}", children.len(), entity.path);

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.json"), "{}").unwrap();
        std::fs::write(temp.path().join("a.txt"), "hello").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub").join("nested.png"), [0u8; 8]).unwrap();
        temp
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("/"), "/");
        assert_eq!(encode_href("/sub/a.txt"), "/sub/a.txt");
        assert_eq!(encode_href("/my dir/a&b.txt"), "/my%20dir/a%26b.txt");
        assert_eq!(encode_href("/100%.txt"), "/100%25.txt");
    }

    #[tokio::test]
    async fn test_read_children_immediate_only_and_sorted() {
        let temp = fixture();
        let root = Entity::new("/", None);

        let children = read_children(temp.path(), &root).await.unwrap();
        let paths: Vec<_> = children.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a.txt", "/b.json", "/sub"]);

        let a = &children[0];
        assert_eq!(a.size, Some(5));
        assert_eq!(a.file_type, FileType::Txt);
        assert!(children[2].is_dir());
    }

    #[tokio::test]
    async fn test_read_children_uses_request_relative_paths() {
        let temp = fixture();
        let sub = Entity::new("/sub", None);

        let children = read_children(temp.path(), &sub).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path, "/sub/nested.png");
        assert_eq!(children[0].name, "nested.png");
    }

    #[tokio::test]
    async fn test_read_children_of_a_plain_file_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes"), "not a directory").unwrap();
        let notes = Entity::new("/notes", None);
        assert!(notes.is_dir());

        let result = read_children(temp.path(), &notes).await;
        assert!(matches!(result, Err(FileServerError::Io(_))));
    }

    #[tokio::test]
    async fn test_html_renderer_lists_children_and_parent() {
        let temp = fixture();
        let config = Config::default();
        let sub = Entity::new("/sub", None);
        let children = read_children(temp.path(), &sub).await.unwrap();

        let html = HtmlRenderer
            .render(&ListingContext::new(&sub, &children, &config))
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<a href=\"/\">..</a>"));
        assert!(html.contains("<a href=\"/sub/nested.png\">nested.png</a>"));
        assert!(html.contains("/static/icons/png.svg"));
        assert!(html.contains("8B"));
    }

    #[tokio::test]
    async fn test_html_renderer_root_has_no_parent_link() {
        let config = Config::default();
        let root = Entity::new("/", None);

        let html = HtmlRenderer
            .render(&ListingContext::new(&root, &[], &config))
            .unwrap();

        assert!(!html.contains(">..</a>"));
        assert!(!html.contains("<tr class=\"file\">"));
    }

    #[tokio::test]
    async fn test_html_renderer_rejects_invalid_time_format() {
        let temp = fixture();
        let config = Config {
            time_format: "%Y-%Q".to_string(),
            ..Config::default()
        };
        let root = Entity::new("/", None);
        let children = read_children(temp.path(), &root).await.unwrap();

        let result = HtmlRenderer.render(&ListingContext::new(&root, &children, &config));
        assert!(matches!(result, Err(FileServerError::Render(_))));
    }

    #[test]
    fn test_html_renderer_escapes_names() {
        let config = Config::default();
        let root = Entity::new("/", None);
        let children = vec![Entity::new("/<b>.txt", None)];

        let html = HtmlRenderer
            .render(&ListingContext::new(&root, &children, &config))
            .unwrap();

        assert!(html.contains("&lt;b&gt;.txt"));
        assert!(!html.contains("<b>.txt"));
    }
}
