use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use pdf_qa::config::UiConfig;
use pdf_qa::ui::build_ui_router;

#[tokio::test]
async fn index_page_points_at_configured_api() {
    let config = UiConfig {
        api_base_url: "http://qa.internal:9000/".to_string(),
        ..UiConfig::default()
    };

    let response = build_ui_router(&config)
        .unwrap()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains(r#"const API_BASE_URL = "http://qa.internal:9000";"#));
}

#[tokio::test]
async fn ui_health_endpoint() {
    let response = build_ui_router(&UiConfig::default())
        .unwrap()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
