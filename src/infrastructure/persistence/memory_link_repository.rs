//! In-process link repository.

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink, Visit, count_clicks};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory implementation of [`LinkRepository`].
///
/// Links are kept in insertion order, which is the order search results are
/// returned in. Visit recording happens under the write lock, so append and
/// recompute are atomic. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: RwLock<Vec<Link>>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed record as-is, bypassing creation rules.
    ///
    /// Lets tests and imports seed records the public API cannot produce,
    /// such as links without a redirect.
    pub async fn insert_raw(&self, link: &str, redirect: Option<&str>, context: &str) -> Link {
        let mut links = self.links.write().await;
        let record = Link {
            id: links.len() as i64 + 1,
            link: link.to_string(),
            redirect: redirect.map(|s| s.to_string()),
            context: context.to_string(),
            clicks: None,
            visits: Vec::new(),
            created_at: Utc::now(),
        };
        links.push(record.clone());
        record
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.iter().any(|l| l.link == new_link.link) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_link_key" }),
            ));
        }

        let record = Link {
            id: links.len() as i64 + 1,
            link: new_link.link,
            redirect: Some(new_link.redirect),
            context: new_link.context,
            clicks: None,
            visits: Vec::new(),
            created_at: Utc::now(),
        };
        links.push(record.clone());

        Ok(record)
    }

    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.read().await;
        Ok(links.iter().find(|l| l.link == link).cloned())
    }

    async fn exists(&self, link: &str) -> Result<bool, AppError> {
        let links = self.links.read().await;
        Ok(links.iter().any(|l| l.link == link))
    }

    async fn search_by_context(&self, pattern: &str) -> Result<Vec<Link>, AppError> {
        let regex = Regex::new(pattern).map_err(|_| {
            AppError::bad_request("Invalid context pattern", json!({ "fields": ["context"] }))
        })?;

        let links = self.links.read().await;
        Ok(links
            .iter()
            .filter(|l| regex.is_match(&l.context))
            .cloned()
            .collect())
    }

    async fn record_visit(&self, link_id: i64, visit: Visit) -> Result<i64, AppError> {
        let mut links = self.links.write().await;

        let record = links
            .iter_mut()
            .find(|l| l.id == link_id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link_id": link_id })))?;

        record.visits.push(visit);
        let clicks = count_clicks(&record.visits);
        record.clicks = Some(clicks);

        Ok(clicks)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.read().await.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
