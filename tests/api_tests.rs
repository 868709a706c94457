use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use async_trait::async_trait;
use http_body_util::BodyExt;
use presence_resolver::config::Config;
use presence_resolver::db::Store;
use presence_resolver::services::{
    ResolutionService, ResolveError, ResolveOutcome, ResolveRequest, SeaOrmSettingsService,
    SettingsService, StrategyStatus,
};
use presence_resolver::state::SharedState;
use std::sync::Arc;
use tower::ServiceExt;

/// Resolver whose every request blows up mid-pipeline.
struct ExplodingResolver;

#[async_trait]
impl ResolutionService for ExplodingResolver {
    async fn resolve(&self, _request: ResolveRequest) -> Result<ResolveOutcome, ResolveError> {
        panic!("pipeline exploded");
    }

    async fn clear_cache(&self) -> u64 {
        0
    }

    async fn purge_expired(&self) -> u64 {
        0
    }

    fn strategies(&self) -> StrategyStatus {
        StrategyStatus {
            search_configured: false,
            ai_providers: Vec::new(),
        }
    }
}

async fn spawn_app() -> Router {
    let config = Config::default();
    let store = Store::in_memory().await.expect("Failed to open store");
    let shared = SharedState::with_store(config, store).expect("Failed to wire services");

    let state = presence_resolver::api::create_app_state(Arc::new(shared), None);
    presence_resolver::api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_missing_business_name_is_rejected() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/places/social-media")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "businessName is required");

    let (status, _) = send(&app, get("/api/places/social-media?businessName=%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resolution_without_credentials_returns_google_only() {
    let app = spawn_app().await;

    let (status, json) = send(
        &app,
        get("/api/places/social-media?businessName=Blue%20Moon%20Plumbing%20Ltd&placeId=ChIJ42"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["cached"], false);

    let data = json["data"].as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(
        json["data"]["google"]["reviewUrl"],
        "https://search.google.com/local/writereview?placeid=ChIJ42"
    );
    assert_eq!(json["data"]["google"]["verified"], false);
    assert_eq!(json["data"]["google"]["foundVia"], "constructed");
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let app = spawn_app().await;
    let uri = "/api/places/social-media?businessName=Garden%20Restaurant&address=Leeds";

    let (_, first) = send(&app, get(uri)).await;
    assert_eq!(first["cached"], false);

    let (_, second) = send(&app, get(uri)).await;
    assert_eq!(second["cached"], true);
    assert_eq!(first["data"], second["data"]);

    let (_, bypass) = send(&app, get(&format!("{uri}&skipCache=true"))).await;
    assert_eq!(bypass["cached"], false);
}

#[tokio::test]
async fn test_clear_cache_endpoint() {
    let app = spawn_app().await;
    let uri = "/api/places/social-media?businessName=Garden%20Restaurant";

    send(&app, get(uri)).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/places/social-media/cache")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["removed"], 1);

    let (_, after) = send(&app, get(uri)).await;
    assert_eq!(after["cached"], false);
}

#[tokio::test]
async fn test_caching_setting_toggle() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/settings/caching")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["caching"]["enabled"], true);

    let (status, json) = send(&app, post_json("/api/settings/caching", r#"{"enabled":false}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["caching"]["enabled"], false);

    let uri = "/api/places/social-media?businessName=Garden%20Restaurant";
    send(&app, get(uri)).await;
    let (_, second) = send(&app, get(uri)).await;
    assert_eq!(second["cached"], false);

    let (_, json) = send(&app, get("/api/settings/caching")).await;
    assert_eq!(json["caching"]["enabled"], false);
}

#[tokio::test]
async fn test_caching_setting_requires_boolean() {
    let app = spawn_app().await;

    let (status, json) =
        send(&app, post_json("/api/settings/caching", r#"{"enabled":"false"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "enabled must be boolean");
}

#[tokio::test]
async fn test_system_status_and_metrics() {
    let app = spawn_app().await;

    let (status, json) = send(&app, get("/api/system/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["database"], true);
    assert_eq!(json["data"]["strategies"]["searchConfigured"], false);
    assert_eq!(
        json["data"]["strategies"]["aiProviders"]
            .as_array()
            .unwrap()
            .len(),
        0
    );

    let response = app.clone().oneshot(get("/api/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_resolver_panic_becomes_generic_failure() {
    let config = Config::default();
    let store = Store::in_memory().await.expect("Failed to open store");
    let settings =
        Arc::new(SeaOrmSettingsService::new(store.clone(), true)) as Arc<dyn SettingsService>;
    let shared = SharedState::from_parts(config, store, settings, Arc::new(ExplodingResolver));
    let app = presence_resolver::api::router(presence_resolver::api::create_app_state(
        Arc::new(shared),
        None,
    ));

    let (status, json) = send(
        &app,
        get("/api/places/social-media?businessName=Blue%20Moon%20Plumbing"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to search social media");
    assert!(json.get("data").is_none());
}
