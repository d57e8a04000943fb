use axum::{routing::get, Router};

use crate::handlers;
use crate::AppState;

/// Create browse routes; every GET path maps onto the root directory.
pub fn browse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::browse))
        .route("/*path", get(handlers::browse))
}
