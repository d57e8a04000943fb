use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tokio::fs;
use tracing::debug;

use crate::entity::Entity;
use crate::error::FileServerError;
use crate::listing::{read_children, ListingContext};
use crate::resolver::{resolve, to_fs_path};
use crate::AppState;

/// GET /*path - Directory listing or file contents
pub async fn browse(State(state): State<AppState>, uri: Uri) -> Result<Response, FileServerError> {
    let entity = resolve(&state.root_dir, uri.path()).await?;
    dispatch(&state, &entity).await
}

/// Route an entity to the listing or the file responder by its type.
pub async fn dispatch(state: &AppState, entity: &Entity) -> Result<Response, FileServerError> {
    debug!("Dispatching {} as {:?}", entity.path, entity.file_type);

    if entity.is_dir() {
        list_directory(state, entity).await
    } else {
        serve_file(state, entity).await
    }
}

/// Render the immediate children of a directory entity as HTML.
pub async fn list_directory(state: &AppState, entity: &Entity) -> Result<Response, FileServerError> {
    let children = read_children(&state.root_dir, entity).await?;
    let ctx = ListingContext::new(entity, &children, &state.config);
    let body = state.renderer.render(&ctx)?;

    Ok(Html(body).into_response())
}

/// Return the whole file with a content type chosen from its category.
pub async fn serve_file(state: &AppState, entity: &Entity) -> Result<Response, FileServerError> {
    let path = to_fs_path(&state.root_dir, &entity.path);
    let data = fs::read(&path).await?;

    debug!("Serving {} ({} bytes)", path.display(), data.len());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, entity.file_type.content_type())],
        data,
    )
        .into_response())
}
