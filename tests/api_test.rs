use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use campus_hub::{
    api, config::Settings, directory::LocationDirectory, service::ServiceContext,
};
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn test_app() -> anyhow::Result<Router> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let service_context = Arc::new(ServiceContext::new(pool));
    let directory = Arc::new(LocationDirectory::builtin());
    let settings = Arc::new(Settings::default());

    Ok(api::create_app(service_context, directory, settings))
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint_is_public() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_api_routes_require_a_session() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/api/dashboard").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_sets_a_usable_session_cookie() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .clone()
        .oneshot(json_post(
            "/auth/register",
            r#"{"username":"priya","email":"priya@campus.edu","password":"secret123"}"#,
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("registration should set a session cookie")
        .to_str()?;
    // Send back just the name=value pair, as a browser would.
    let cookie = set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string();

    // The fresh cookie opens the gated routes.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/navigation")
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_logout_ends_the_session() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .clone()
        .oneshot(json_post(
            "/auth/register",
            r#"{"username":"rahul","email":"rahul@campus.edu","password":"secret123"}"#,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("registration should set a session cookie")
        .to_str()?
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The old token no longer opens the gated routes.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard")
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_map_lists_every_location() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .clone()
        .oneshot(json_post(
            "/auth/register",
            r#"{"username":"meera","email":"meera@campus.edu","password":"secret123"}"#,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("registration should set a session cookie")
        .to_str()?
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/navigation/map")
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    let total = json["total"].as_u64().expect("map should report a total");
    assert_eq!(
        total,
        LocationDirectory::builtin().all().len() as u64,
        "the map should carry the unfiltered directory"
    );
    Ok(())
}

#[tokio::test]
async fn test_register_rejects_short_passwords() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(json_post(
            "/auth/register",
            r#"{"username":"priya","email":"priya@campus.edu","password":"short"}"#,
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() -> anyhow::Result<()> {
    let app = test_app().await?;

    let body = r#"{"username":"priya","email":"priya@campus.edu","password":"secret123"}"#;
    let first = app.clone().oneshot(json_post("/auth/register", body)).await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(json_post("/auth/register", body)).await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn test_rss_feed_is_public() -> anyhow::Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/feeds/announcements.rss")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("feed should declare a content type")
        .to_str()?;
    assert!(content_type.starts_with("application/rss+xml"));
    Ok(())
}
