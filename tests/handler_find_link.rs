mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_find_link_unvisited() {
    let (server, _) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;
    let link = format!("{}{}", common::BASE, token);

    let response = server.get("/v0/link").add_query_param("path", &link).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({
            "link": link,
            "redirect": "http://example.com",
            "context": "demo"
        })
    );
}

#[tokio::test]
async fn test_find_link_after_visits() {
    let (server, _) = common::create_test_server();
    let token = common::create_link(&server, "http://example.com", "demo").await;
    let link = format!("{}{}", common::BASE, token);

    server
        .get(&format!("/{}", token))
        .add_header("User-Agent", common::DESKTOP_UA)
        .await;
    server
        .get(&format!("/{}", token))
        .add_header("User-Agent", common::BOT_UA)
        .await;

    let json = server
        .get("/v0/link")
        .add_query_param("path", &link)
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["clicks"], 1);
    assert_eq!(json["raw"]["clicks"].as_array().unwrap().len(), 2);
    assert_eq!(json["raw"]["clicks"][0]["ua"], common::DESKTOP_UA);
    assert_eq!(json["raw"]["clicks"][0]["type"], "desktop");
    assert_eq!(json["raw"]["clicks"][1]["type"], "bot");
    assert!(json.get("id").is_none());
}

#[tokio::test]
async fn test_find_link_unknown_is_empty_object() {
    let (server, _) = common::create_test_server();

    let response = server
        .get("/v0/link")
        .add_query_param("path", "http://localhost:8000/missing")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({}));
}

#[tokio::test]
async fn test_find_link_missing_path() {
    let (server, _) = common::create_test_server();

    let response = server.get("/v0/link").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_link_path_not_a_url() {
    let (server, _) = common::create_test_server();

    let response = server
        .get("/v0/link")
        .add_query_param("path", "abc123")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
