//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, and context search
//! - [`services::click_service::ClickService`] - Redirect resolution and click accounting

pub mod services;
