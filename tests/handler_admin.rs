mod common;

use axum::{Router, http::StatusCode, middleware};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use very_short_link::api;
use very_short_link::api::middleware::auth;

fn server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let admin = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let app = Router::new().nest("/api", admin).with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_admin_requires_token(pool: SqlitePool) {
    let server = server(pool);

    let response = server.get("/api/admin/links").await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["code"], "unauthorized");
}

#[sqlx::test]
async fn test_admin_rejects_wrong_token(pool: SqlitePool) {
    let server = server(pool);

    server
        .get("/api/admin/links")
        .authorization_bearer("not-the-token")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_admin_list_links(pool: SqlitePool) {
    let now = common::now();
    common::create_test_link(&pool, "example.com/page", now + 259_200).await;
    common::create_test_link(&pool, "https://rust-lang.org", now + 3_600).await;
    common::create_test_link(&pool, "example.com/expired", now - 1).await;
    let server = server(pool);

    let response = server
        .get("/api/admin/links")
        .authorization_bearer(common::ADMIN_TOKEN)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["token"], "1");
    assert_eq!(links[0]["url"], "example.com/page");
    assert_eq!(links[1]["url"], "https://rust-lang.org");
    assert!(links[1]["remaining"].is_string());
}

#[sqlx::test]
async fn test_admin_delete_link(pool: SqlitePool) {
    common::create_test_link(&pool, "example.com/page", common::now() + 100).await;
    let server = server(pool.clone());

    server
        .delete("/api/admin/links")
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "id": 1 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(common::count_rows(&pool).await, 0);
}

#[sqlx::test]
async fn test_admin_delete_missing_link(pool: SqlitePool) {
    let server = server(pool);

    server
        .delete("/api/admin/links")
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "id": 99 }))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[sqlx::test]
async fn test_admin_delete_invalid_body(pool: SqlitePool) {
    let server = server(pool);

    server
        .delete("/api/admin/links")
        .authorization_bearer(common::ADMIN_TOKEN)
        .json(&json!({ "id": "1" }))
        .await
        .assert_status_bad_request();
}
