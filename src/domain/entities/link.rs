//! Link entity representing a short link bound to a destination and a context.

use chrono::{DateTime, Utc};

use crate::domain::device::DeviceType;

/// A stored short link with its recorded visits.
///
/// `id` is the store's internal identity and is never exposed over HTTP.
/// `clicks` stays `None` until the first visit is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub link: String,
    pub redirect: Option<String>,
    pub context: String,
    pub clicks: Option<i64>,
    pub visits: Vec<Visit>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns the redirect target if this link may be served.
    ///
    /// A link without a redirect, or one that redirects to itself, is never
    /// resolvable.
    pub fn resolvable_redirect(&self) -> Option<&str> {
        self.redirect
            .as_deref()
            .filter(|redirect| *redirect != self.link)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub link: String,
    pub redirect: String,
    pub context: String,
}

/// A single visit to a short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: DeviceType,
}

impl Visit {
    pub fn new(ip: Option<String>, user_agent: Option<&str>, device_type: DeviceType) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            device_type,
        }
    }
}

/// Counts the visits that were not made by bots.
///
/// This is the only way the `clicks` value of a link is produced.
pub fn count_clicks(visits: &[Visit]) -> i64 {
    visits.iter().filter(|v| !v.device_type.is_bot()).count() as i64
}
