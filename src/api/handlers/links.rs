//! Handlers for link creation, lookup and context search.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    FindLinkQuery, FindLinkResponse, LinkRecord, NewLinkQuery, NewLinkResponse, SearchQuery,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `GET /v0/new/link?redirect=<url>&context=<text>`
///
/// # Response
///
/// ```json
/// { "uri": "http://localhost:8000/Xk3_9aQ0bLmZ" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `redirect` is missing or not a URL, or if
/// `context` is missing or empty. Returns 500 if the store fails.
pub async fn new_link_handler(
    State(state): State<AppState>,
    Query(query): Query<NewLinkQuery>,
) -> Result<Json<NewLinkResponse>, AppError> {
    query.validate()?;

    let redirect = query.redirect.ok_or_else(|| missing_param("redirect"))?;
    let context = query.context.ok_or_else(|| missing_param("context"))?;

    let link = state.link_service.create_link(&redirect, &context).await?;

    Ok(Json(NewLinkResponse { uri: link.link }))
}

/// Looks up a link by its full short URL.
///
/// # Endpoint
///
/// `GET /v0/link?path=<short link>`
///
/// # Response
///
/// The link record, or `{}` when nothing matches.
///
/// ```json
/// {
///   "link": "http://localhost:8000/Xk3_9aQ0bLmZ",
///   "redirect": "http://example.com",
///   "context": "demo",
///   "clicks": 1,
///   "raw": { "clicks": [ { "ip": "127.0.0.1", "ua": "curl/8.5.0", "type": "unknown" } ] }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `path` is missing or not a URL.
pub async fn find_link_handler(
    State(state): State<AppState>,
    Query(query): Query<FindLinkQuery>,
) -> Result<Json<FindLinkResponse>, AppError> {
    query.validate()?;

    let path = query.path.ok_or_else(|| missing_param("path"))?;

    let link = state.link_service.find_by_link(&path).await?;

    Ok(Json(link.into()))
}

/// Searches links whose context matches a regular expression.
///
/// # Endpoint
///
/// `GET /v0/search?context=<pattern>`
///
/// A missing or empty `context` yields `[]`. Results are in creation order.
///
/// # Errors
///
/// Returns 400 Bad Request if `context` is not a valid regular expression.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<LinkRecord>>, AppError> {
    let pattern = query.context.unwrap_or_default();

    let links = state.link_service.search_by_context(&pattern).await?;

    Ok(Json(links.into_iter().map(LinkRecord::from).collect()))
}

fn missing_param(name: &str) -> AppError {
    AppError::bad_request("Bad request", json!({ "fields": [name] }))
}
