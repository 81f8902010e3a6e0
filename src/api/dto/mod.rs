//! Data Transfer Objects for API requests and responses.
//!
//! Query DTOs are validated with validator before reaching the services.

pub mod health;
pub mod link;
