//! Redirect resolution and click accounting.

use std::sync::Arc;

use crate::domain::entities::Visit;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::id_generator::is_valid_token;
use crate::utils::link_base::LinkBase;

/// Service handling a visit to a short link.
///
/// Resolves the token to its destination, records the visit, and returns the
/// redirect target. Visit recording is best-effort: a failure to persist it
/// is logged and the redirect target is still returned.
pub struct ClickService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    link_base: LinkBase,
}

impl<L: LinkRepository + ?Sized> ClickService<L> {
    /// Creates a new click service.
    pub fn new(link_repository: Arc<L>, link_base: LinkBase) -> Self {
        Self {
            link_repository,
            link_base,
        }
    }

    /// Resolves `token`, records `visit`, and returns the redirect target.
    ///
    /// # Request Flow
    ///
    /// 1. Reject tokens outside `[A-Za-z0-9_-]`
    /// 2. Look up `<base><token>`
    /// 3. Reject links without a redirect or redirecting to themselves
    /// 4. Append the visit and recompute the click count
    /// 5. Return the redirect target regardless of the outcome of step 4
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for every unresolvable token. The error is
    /// the same whether the token is malformed, unknown, or unusable.
    ///
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn visit(&self, token: &str, visit: Visit) -> Result<String, AppError> {
        if !is_valid_token(token) {
            return Err(AppError::link_not_found());
        }

        let link = self.link_base.link_for(token);

        let record = self
            .link_repository
            .find_by_link(&link)
            .await?
            .ok_or_else(AppError::link_not_found)?;

        let redirect = record
            .resolvable_redirect()
            .ok_or_else(AppError::link_not_found)?
            .to_string();

        match self
            .link_repository
            .record_visit(record.id, visit.clone())
            .await
        {
            Ok(clicks) => {
                tracing::debug!(link = %link, clicks, device = %visit.device_type, "Visit recorded");
            }
            Err(e) => {
                tracing::error!(
                    link = %link,
                    error = %e,
                    ip = ?visit.ip,
                    user_agent = ?visit.user_agent,
                    device = %visit.device_type,
                    "Error saving clicks"
                );
            }
        }

        Ok(redirect)
    }
}
