//! HTTP API layer.
//!
//! Translates query strings into service calls and service results into
//! JSON responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Versioned route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
