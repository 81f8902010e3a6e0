//! Versioned API route configuration.

use crate::api::handlers::{find_link_handler, new_link_handler, search_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public `/v0` routes.
///
/// # Endpoints
///
/// - `GET /new/link` - Create a short link
/// - `GET /link`     - Look up a link by its full short URL
/// - `GET /search`   - Search links by context pattern
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/new/link", get(new_link_handler))
        .route("/link", get(find_link_handler))
        .route("/search", get(search_handler))
}
