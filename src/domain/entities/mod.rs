//! Core domain entities.
//!
//! - [`Link`] - A stored short link with its visits
//! - [`NewLink`] - Input for creating a link
//! - [`Visit`] - A single recorded visit

pub mod link;

pub use link::{Link, NewLink, Visit, count_clicks};
