mod common;

use axum::http::StatusCode;

use common::*;
use whitehall_admin::server::build_router;

#[tokio::test]
async fn test_health_check_pings_database() {
    let state = setup_test_state().await;
    let app = build_router(state, &[]);

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "whitehall-admin");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_admin_routes() {
    let state = setup_test_state().await;
    let app = build_router(state, &["http://localhost:3000".to_string()]);

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/admin/roles"));
    assert!(paths.contains_key("/api/admin/imports/publications"));
    assert!(paths.contains_key("/api/topics/{slug}"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let state = setup_test_state().await;
    let app = build_router(state, &[]);

    let (status, _) = send(&app, "GET", "/api/admin/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
