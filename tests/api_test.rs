// HTTP 接口集成测试

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{memory_database, movie, FakeSource};
use moviedeck_backend::api::{create_router, AppState};
use moviedeck_backend::models::ImageUrlBuilder;
use moviedeck_backend::services::ImportService;

async fn app_with_source(source: Option<FakeSource>) -> Router {
    let database = memory_database().await;
    let importer = source.map(|source| {
        Arc::new(ImportService::new(database.pool().clone(), Arc::new(source), 50))
    });

    create_router(AppState {
        database,
        importer,
        tmdb: None,
        images: ImageUrlBuilder::new("https://img.example.com/t/p", "w500"),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_without_tmdb() {
    let app = app_with_source(None).await;

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["tmdb_api"], "not_configured");
}

#[tokio::test]
async fn test_import_requires_tmdb() {
    let app = app_with_source(None).await;

    let (status, body) = send(&app, post_json("/api/import", json!({"from": 1, "to": 2}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["type"], "external_service_error");
}

#[tokio::test]
async fn test_import_then_browse() {
    let source = FakeSource::new()
        .with_movie(movie(603, "The Matrix"))
        .with_movie(movie(604, "The Matrix Reloaded"));
    let app = app_with_source(Some(source)).await;

    let (status, body) = send(&app, post_json("/api/import", json!({"from": 603, "to": 605}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["requested"], 3);
    assert_eq!(body["data"]["imported"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["skipped"][0]["tmdb_id"], 605);
    assert_eq!(body["data"]["skipped"][0]["reason"], "not_found");
    assert_eq!(body["message"], "3 requested, 2 imported, 1 skipped, 0 failed");

    let (status, body) = send(&app, get("/api/movies?limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["limit"], 1);
    assert_eq!(body["data"]["has_more"], true);

    let (_, body) = send(&app, get("/api/movies?query=reloaded")).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let movie_id = items[0]["id"].as_str().unwrap().to_string();
    assert_eq!(items[0]["poster_url"], "https://img.example.com/t/p/w500/poster604.jpg");

    let (status, body) = send(&app, get(&format!("/api/movies/{}", movie_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "The Matrix Reloaded");
    assert_eq!(body["data"]["cast"][0]["full_name"], "Keanu Reeves");
    assert_eq!(body["data"]["cast"][0]["photo_url"], "https://img.example.com/t/p/w500/6384.jpg");
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/actors")).await;
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["items"][0]["work_count"], 2);

    let actor_id = body["data"]["items"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = send(&app, get(&format!("/api/actors/{}", actor_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "actor");
    assert_eq!(body["data"]["filmography"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/directors")).await;
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = send(&app, get("/api/genres")).await;
    assert_eq!(body["data"][0]["name"], "Action");
    assert_eq!(body["data"][0]["movie_count"], 2);

    let (_, body) = send(&app, get("/api/companies")).await;
    assert_eq!(body["data"]["items"][0]["movie_count"], 2);

    let (_, body) = send(&app, get("/api/stats")).await;
    assert_eq!(body["data"]["movie_count"], 2);
}

#[tokio::test]
async fn test_invalid_range_returns_validation_error() {
    let app = app_with_source(Some(FakeSource::new())).await;

    let (status, body) = send(&app, post_json("/api/import", json!({"from": 10, "to": 1}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "validation_error");

    let (status, _) = send(&app, post_json("/api/import", json!({"from": 1, "to": 100}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_resources_return_404() {
    let app = app_with_source(Some(FakeSource::new())).await;

    let (status, body) = send(&app, get("/api/movies/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found");

    let (status, _) = send(&app, get("/api/directors/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/tmdb/movies/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_and_popular() {
    let source = FakeSource::new()
        .with_movie(movie(550, "Fight Club"))
        .with_popular(&[550, 680]);
    let app = app_with_source(Some(source)).await;

    let (status, body) = send(&app, get("/api/tmdb/movies/550")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Fight Club");
    assert_eq!(body["data"]["actors"][0]["character"], "Neo");

    let (_, body) = send(&app, get("/api/tmdb/popular?page=1")).await;
    assert_eq!(body["data"], json!([550, 680]));

    let (status, body) = send(&app, post_json("/api/import/popular", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imported"][0]["tmdb_id"], 550);

    // 预览不写库，导入后才有数据
    let (_, body) = send(&app, get("/api/movies")).await;
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_preview_rejects_non_positive_tmdb_id() {
    let source = FakeSource::new().with_movie(movie(550, "Fight Club"));
    let app = app_with_source(Some(source)).await;

    let (status, body) = send(&app, get("/api/tmdb/movies/0")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["message"], "TMDB id must be at least 1 (got 0)");
}
