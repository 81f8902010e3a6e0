mod common;

use axum::http::StatusCode;
use link_context::domain::repositories::LinkRepository;

fn link(token: &str) -> String {
    format!("{}{}", common::BASE, token)
}

#[tokio::test]
async fn test_redirect_success() {
    let (server, _) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;

    let response = server
        .get(&format!("/{}", token))
        .add_header("User-Agent", common::DESKTOP_UA)
        .await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "http://example.com");
}

#[tokio::test]
async fn test_redirect_records_visit() {
    let (server, repo) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;

    server
        .get(&format!("/{}", token))
        .add_header("User-Agent", common::DESKTOP_UA)
        .await
        .assert_status(StatusCode::FOUND);

    let stored = repo.find_by_link(&link(&token)).await.unwrap().unwrap();
    assert_eq!(stored.clicks, Some(1));
    assert_eq!(stored.visits.len(), 1);
    assert_eq!(stored.visits[0].user_agent.as_deref(), Some(common::DESKTOP_UA));
    assert_eq!(stored.visits[0].device_type.as_str(), "desktop");
}

#[tokio::test]
async fn test_redirect_bots_do_not_count() {
    let (server, repo) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;
    let path = format!("/{}", token);

    for ua in [
        common::DESKTOP_UA,
        common::BOT_UA,
        common::DESKTOP_UA,
        common::BOT_UA,
        common::BOT_UA,
        common::DESKTOP_UA,
    ] {
        server
            .get(&path)
            .add_header("User-Agent", ua)
            .await
            .assert_status(StatusCode::FOUND);
    }

    let stored = repo.find_by_link(&link(&token)).await.unwrap().unwrap();
    assert_eq!(stored.clicks, Some(3));
    assert_eq!(stored.visits.len(), 6);
}

#[tokio::test]
async fn test_redirect_without_user_agent_counts() {
    let (server, repo) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;

    server
        .get(&format!("/{}", token))
        .await
        .assert_status(StatusCode::FOUND);

    let stored = repo.find_by_link(&link(&token)).await.unwrap().unwrap();
    assert_eq!(stored.clicks, Some(1));
    assert!(!stored.visits[0].device_type.is_bot());
}

#[tokio::test]
async fn test_redirect_unknown_token() {
    let (server, _) = common::create_test_server();

    let response = server.get("/doesnotexist").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_invalid_token_matches_unknown() {
    let (server, _) = common::create_test_server();

    let invalid = server.get("/abc.def").await;
    let unknown = server.get("/abcdef").await;

    invalid.assert_status(StatusCode::NOT_FOUND);
    unknown.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        invalid.json::<serde_json::Value>(),
        unknown.json::<serde_json::Value>()
    );
}

#[tokio::test]
async fn test_redirect_record_without_redirect() {
    let (server, repo) = common::create_test_server();
    repo.insert_raw(&link("orphan"), None, "demo").await;

    let response = server.get("/orphan").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let stored = repo.find_by_link(&link("orphan")).await.unwrap().unwrap();
    assert!(stored.visits.is_empty());
}

#[tokio::test]
async fn test_redirect_to_itself() {
    let (server, repo) = common::create_test_server();
    repo.insert_raw(&link("loop"), Some(&link("loop")), "demo")
        .await;

    let response = server.get("/loop").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_store_error() {
    let server = common::create_unavailable_server();

    let response = server.get("/abc123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
