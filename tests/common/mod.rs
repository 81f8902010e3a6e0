#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_context::AppError;
use link_context::domain::device::{DeviceClassifier, DeviceType};
use link_context::domain::entities::{Link, NewLink, Visit};
use link_context::domain::repositories::LinkRepository;
use link_context::infrastructure::persistence::MemoryLinkRepository;
use link_context::routes::router;
use link_context::state::AppState;
use link_context::utils::id_generator::IdGenerator;
use link_context::utils::link_base::LinkBase;
use serde_json::json;
use std::sync::Arc;

pub const BASE: &str = "http://localhost:8000/";
pub const BOT_UA: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
pub const DESKTOP_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Classifier with predictable output: user-agents containing "bot" are bots,
/// every other present user-agent is a desktop.
pub struct FixedClassifier;

impl DeviceClassifier for FixedClassifier {
    fn classify(&self, user_agent: Option<&str>) -> DeviceType {
        match user_agent {
            Some(ua) if ua.to_ascii_lowercase().contains("bot") => DeviceType::Bot,
            Some(_) => DeviceType::Desktop,
            None => DeviceType::Unknown,
        }
    }
}

pub fn create_test_state(repo: Arc<MemoryLinkRepository>) -> AppState {
    AppState::new(
        repo,
        IdGenerator::new(1),
        LinkBase::new("localhost", 8000, false),
        Arc::new(FixedClassifier),
        false,
    )
}

/// Test server over a fresh in-memory store; the store is returned for seeding.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let server = TestServer::new(router(create_test_state(repo.clone()))).unwrap();

    (server, repo)
}

/// Creates a link through the API and returns its token.
pub async fn create_link(server: &TestServer, redirect: &str, context: &str) -> String {
    let response = server
        .get("/v0/new/link")
        .add_query_param("redirect", redirect)
        .add_query_param("context", context)
        .await;

    response.assert_status_ok();

    let uri = response.json::<serde_json::Value>()["uri"]
        .as_str()
        .unwrap()
        .to_string();

    uri.strip_prefix(BASE).unwrap().to_string()
}

/// Store whose every operation fails, for exercising error paths.
pub struct UnavailableRepository;

fn unavailable() -> AppError {
    AppError::internal("Internal server error", json!({}))
}

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn find_by_link(&self, _link: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn exists(&self, _link: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn search_by_context(&self, _pattern: &str) -> Result<Vec<Link>, AppError> {
        Err(unavailable())
    }

    async fn record_visit(&self, _link_id: i64, _visit: Visit) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub fn create_unavailable_server() -> TestServer {
    let state = AppState::new(
        Arc::new(UnavailableRepository),
        IdGenerator::new(1),
        LinkBase::new("localhost", 8000, false),
        Arc::new(FixedClassifier),
        false,
    );

    TestServer::new(router(state)).unwrap()
}
