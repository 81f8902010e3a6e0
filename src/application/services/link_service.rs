//! Link creation, lookup, and context search.

use std::sync::Arc;

use axum::http::HeaderValue;
use regex::Regex;
use serde_json::json;
use url::Url;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::id_generator::IdGenerator;
use crate::utils::link_base::LinkBase;

/// Maximum number of token candidates tried before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Service for minting and looking up short links.
///
/// Owns the token generator and the link base so every created link has the
/// form `<base><token>`.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    id_generator: Arc<IdGenerator>,
    link_base: LinkBase,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, id_generator: Arc<IdGenerator>, link_base: LinkBase) -> Self {
        Self {
            link_repository,
            id_generator,
            link_base,
        }
    }

    /// Creates a short link for `redirect` tagged with `context`.
    ///
    /// # Token Selection
    ///
    /// Each candidate token is checked against the store before insertion. A
    /// unique violation on insert (another writer took the same link first) is
    /// treated like a collision. Up to 10 candidates are tried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `redirect` is not an absolute http(s)
    /// URL or `context` is empty. The store is not touched in that case.
    ///
    /// Returns [`AppError::Internal`] if the insert fails or no free token was found.
    pub async fn create_link(&self, redirect: &str, context: &str) -> Result<Link, AppError> {
        validate_redirect(redirect)?;
        validate_context(context)?;

        for _ in 0..MAX_ATTEMPTS {
            let link = self.link_base.link_for(&self.id_generator.generate());

            if self.link_repository.exists(&link).await? {
                tracing::warn!(link = %link, "Token collision, retrying");
                continue;
            }

            let new_link = NewLink {
                link,
                redirect: redirect.to_string(),
                context: context.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(created) => {
                    tracing::info!(link = %created.link, context = %created.context, "Link created");
                    return Ok(created);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!("Link taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique link",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Finds a link by its full short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.find_by_link(link).await
    }

    /// Finds every link whose context matches `pattern`.
    ///
    /// An empty pattern yields an empty result without querying the store.
    /// The match is an unanchored regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `pattern` is not a valid regular expression.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn search_by_context(&self, pattern: &str) -> Result<Vec<Link>, AppError> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }

        Regex::new(pattern).map_err(|_| {
            AppError::bad_request("Invalid context pattern", json!({ "fields": ["context"] }))
        })?;

        self.link_repository.search_by_context(pattern).await
    }

    /// Checks that the underlying store is reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

/// Validates that `redirect` is an absolute http or https URL that can be
/// sent back verbatim in a `Location` header.
///
/// `Url::parse` drops tabs and newlines silently, so control characters and
/// anything a header value cannot carry are rejected before parsing.
fn validate_redirect(redirect: &str) -> Result<(), AppError> {
    let invalid = || AppError::bad_request("Bad request", json!({ "fields": ["redirect"] }));

    if redirect.chars().any(|c| c.is_ascii_control()) || HeaderValue::from_str(redirect).is_err() {
        return Err(invalid());
    }

    let url = Url::parse(redirect).map_err(|_| invalid())?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_context(context: &str) -> Result<(), AppError> {
    if context.is_empty() {
        return Err(AppError::bad_request(
            "Bad request",
            json!({ "fields": ["context"] }),
        ));
    }

    Ok(())
}
