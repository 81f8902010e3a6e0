//! Client IP extraction for visit records.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use std::net::SocketAddr;

/// Determines the client IP of a request.
///
/// When `behind_proxy` is set, `X-Forwarded-For` (first entry) and then
/// `X-Real-IP` are consulted before the peer address. Otherwise only the
/// peer address recorded by `ConnectInfo` is used.
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|xff| xff.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Some(ip.to_owned());
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Some(ip.to_owned());
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}
