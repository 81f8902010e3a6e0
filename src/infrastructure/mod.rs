//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory link repositories
//! - [`device`] - woothee-backed device classification

pub mod device;
pub mod persistence;
