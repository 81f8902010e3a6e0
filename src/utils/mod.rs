//! Utility functions for token generation, link construction, and request handling.
//!
//! - [`id_generator`] - Seeded short token generation and validation
//! - [`link_base`] - Base URL for full short links
//! - [`client_ip`] - Client IP extraction from request metadata

pub mod client_ip;
pub mod id_generator;
pub mod link_base;
