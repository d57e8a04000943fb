//! Read-only HTTP directory browser.
//!
//! Directories under a configured root are rendered as HTML listings and
//! files are returned whole, with a content type picked from the extension.
//! The crate can run as the `dirserve` binary or be mounted into another
//! axum application through [`routes::browse_routes`].

pub mod config;
pub mod entity;
pub mod error;
pub mod filetype;
pub mod handlers;
pub mod listing;
pub mod resolver;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

pub use config::Config;
pub use entity::Entity;
pub use error::FileServerError;
pub use filetype::FileType;
pub use listing::{HtmlRenderer, ListingRenderer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Root directory to serve files from
    pub root_dir: PathBuf,
    /// Configuration
    pub config: Arc<Config>,
    /// Listing renderer, built once at startup
    pub renderer: Arc<dyn ListingRenderer>,
}

impl AppState {
    /// Create a new AppState with the given root directory and default config.
    pub fn new(root_dir: PathBuf) -> Self {
        Self::with_config(root_dir, Config::default())
    }

    /// Create a new AppState with the given root directory and config.
    pub fn with_config(root_dir: PathBuf, config: Config) -> Self {
        Self {
            root_dir,
            config: Arc::new(config),
            renderer: Arc::new(HtmlRenderer),
        }
    }

    /// Replace the listing renderer.
    pub fn with_renderer(mut self, renderer: impl ListingRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}
