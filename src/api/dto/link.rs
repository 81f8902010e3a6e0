//! DTOs for link creation, lookup and search endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::device::DeviceType;
use crate::domain::entities::{Link, Visit};

/// Query parameters of `GET /v0/new/link`.
///
/// Both fields are optional at the deserialization level so that missing
/// parameters surface as validation errors rather than extractor rejections.
#[derive(Debug, Deserialize, Validate)]
pub struct NewLinkQuery {
    /// Destination URL (absolute http or https).
    #[validate(required, url)]
    pub redirect: Option<String>,

    /// Free-text tag used for search.
    #[validate(required, length(min = 1))]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewLinkResponse {
    pub uri: String,
}

/// Query parameters of `GET /v0/link`.
#[derive(Debug, Deserialize, Validate)]
pub struct FindLinkQuery {
    /// Full short link to look up.
    #[validate(required, url)]
    pub path: Option<String>,
}

/// Query parameters of `GET /v0/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub context: Option<String>,
}

/// A link as exposed over HTTP. The row id is never part of it.
#[derive(Debug, Serialize)]
pub struct LinkRecord {
    pub link: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    pub context: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawData>,
}

/// Raw visit log, present once the link has been visited.
#[derive(Debug, Serialize)]
pub struct RawData {
    pub clicks: Vec<VisitRecord>,
}

#[derive(Debug, Serialize)]
pub struct VisitRecord {
    pub ip: Option<String>,
    pub ua: Option<String>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

impl From<Visit> for VisitRecord {
    fn from(visit: Visit) -> Self {
        Self {
            ip: visit.ip,
            ua: visit.user_agent,
            device_type: visit.device_type,
        }
    }
}

impl From<Link> for LinkRecord {
    fn from(link: Link) -> Self {
        let raw = if link.visits.is_empty() {
            None
        } else {
            Some(RawData {
                clicks: link.visits.into_iter().map(VisitRecord::from).collect(),
            })
        };

        Self {
            link: link.link,
            redirect: link.redirect,
            context: link.context,
            clicks: link.clicks,
            raw,
        }
    }
}

/// Response of `GET /v0/link`: the record, or `{}` when no link matches.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FindLinkResponse {
    Found(LinkRecord),
    Missing {},
}

impl From<Option<Link>> for FindLinkResponse {
    fn from(link: Option<Link>) -> Self {
        match link {
            Some(link) => Self::Found(link.into()),
            None => Self::Missing {},
        }
    }
}
