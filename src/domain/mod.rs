//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Link and visit data structures
//! - [`repositories`] - Data access trait definitions
//! - [`device`] - Device classification capability used by the redirect handler
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure::persistence`].

pub mod device;
pub mod entities;
pub mod repositories;
