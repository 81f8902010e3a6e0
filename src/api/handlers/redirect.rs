//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{Extensions, HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::domain::entities::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short link to its destination and records the visit.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Request Flow
///
/// 1. Classify the client from its `User-Agent`
/// 2. Resolve the token and record the visit
/// 3. Return 302 Found with `Location` set to the destination
///
/// Visit recording failures are logged and do not affect the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the token is malformed, unknown, has no
/// destination, or redirects to itself. All four cases share one response.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let device_type = state.classifier.classify(user_agent);
    let ip = client_ip(&headers, &extensions, state.behind_proxy);

    let redirect = state
        .click_service
        .visit(&id, Visit::new(ip, user_agent, device_type))
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect)]))
}
