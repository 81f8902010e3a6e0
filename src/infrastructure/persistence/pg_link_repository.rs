//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::device::DeviceType;
use crate::domain::entities::{Link, NewLink, Visit};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, link, redirect, context, clicks, created_at";

/// SQLSTATE raised by `~` for a pattern Postgres cannot compile.
const INVALID_REGULAR_EXPRESSION: &str = "2201B";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    link: String,
    redirect: Option<String>,
    context: String,
    clicks: Option<i64>,
    created_at: DateTime<Utc>,
}

impl LinkRow {
    fn into_link(self, visits: Vec<Visit>) -> Link {
        Link {
            id: self.id,
            link: self.link,
            redirect: self.redirect,
            context: self.context,
            clicks: self.clicks,
            visits,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    link_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    device_type: String,
}

impl VisitRow {
    fn into_visit(self) -> Visit {
        Visit {
            ip: self.ip,
            user_agent: self.user_agent,
            device_type: self.device_type.parse().unwrap_or(DeviceType::Unknown),
        }
    }
}

/// PostgreSQL repository for links and their visits.
///
/// Links live in `links`, visits in `link_visits` (ordered by id). The
/// `clicks` column is derived from `link_visits` on every recorded visit.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads the visits of the given links, grouped by link id in insertion order.
    async fn load_visits(&self, link_ids: &[i64]) -> Result<HashMap<i64, Vec<Visit>>, AppError> {
        if link_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT link_id, ip, user_agent, device_type
            FROM link_visits
            WHERE link_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(link_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut visits: HashMap<i64, Vec<Visit>> = HashMap::new();
        for row in rows {
            visits.entry(row.link_id).or_default().push(row.into_visit());
        }

        Ok(visits)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO links (link, redirect, context) VALUES ($1, $2, $3) RETURNING {}",
            LINK_COLUMNS
        ))
        .bind(&new_link.link)
        .bind(&new_link.redirect)
        .bind(&new_link.context)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into_link(Vec::new()))
    }

    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {} FROM links WHERE link = $1",
            LINK_COLUMNS
        ))
        .bind(link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let visits = self
            .load_visits(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        Ok(Some(row.into_link(visits)))
    }

    async fn exists(&self, link: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM links WHERE link = $1)",
        )
        .bind(link)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn search_by_context(&self, pattern: &str) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {} FROM links WHERE context ~ $1 ORDER BY id",
            LINK_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| {
            let invalid_pattern = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == INVALID_REGULAR_EXPRESSION);

            if invalid_pattern {
                AppError::bad_request("Invalid context pattern", json!({ "fields": ["context"] }))
            } else {
                AppError::from(e)
            }
        })?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut visits = self.load_visits(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let link_visits = visits.remove(&r.id).unwrap_or_default();
                r.into_link(link_visits)
            })
            .collect())
    }

    async fn record_visit(&self, link_id: i64, visit: Visit) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent visits to the same link.
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM links WHERE id = $1 FOR UPDATE")
            .bind(link_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO link_visits (link_id, ip, user_agent, device_type)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(link_id)
        .bind(&visit.ip)
        .bind(&visit.user_agent)
        .bind(visit.device_type.as_str())
        .execute(&mut *tx)
        .await?;

        let clicks = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE links
            SET clicks = (
                SELECT COUNT(*) FROM link_visits
                WHERE link_id = $1 AND device_type <> 'bot'
            )
            WHERE id = $1
            RETURNING clicks
            "#,
        )
        .bind(link_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(clicks)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
