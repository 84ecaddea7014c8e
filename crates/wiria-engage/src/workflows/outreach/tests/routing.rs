use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::outreach::channels::DeliveryChannel;
use crate::workflows::outreach::domain::DeliveryMethod;
use crate::workflows::outreach::router::outreach_router;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn contact_route_reports_the_delivering_channel() {
    let backend = ScriptedChannel::ready(DeliveryMethod::Api, true);
    let (service, _) = service_with(vec![backend as Arc<dyn DeliveryChannel>]);
    let router = outreach_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/outreach/contact")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({
                        "name": "Achieng O.",
                        "email": "achieng@example.org",
                        "subject": "Water project",
                        "message": "How can we partner?"
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], Value::Bool(true));
    assert_eq!(payload["method"], Value::String("api".to_string()));
}

#[tokio::test]
async fn safeguarding_route_defaults_to_anonymous_reporter() {
    let backend = ScriptedChannel::ready(DeliveryMethod::Api, false);
    let (service, _) = service_with(vec![backend as Arc<dyn DeliveryChannel>]);
    let router = outreach_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/outreach/safeguarding")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({
                        "concern": "Child welfare",
                        "details": "Observed at the Tuesday session."
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["method"], Value::String("api".to_string()));

    let manual = payload
        .get("manual")
        .expect("manual links present on failure");
    let whatsapp = manual["whatsapp_url"].as_str().expect("whatsapp url");
    assert!(whatsapp.contains("Anonymous"));
}

#[tokio::test]
async fn newsletter_route_submits_the_subscriber_email() {
    let backend = ScriptedChannel::ready(DeliveryMethod::Api, true);
    let (service, notifier) = service_with(vec![backend as Arc<dyn DeliveryChannel>]);
    let router = outreach_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/outreach/newsletter")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({ "email": "subscriber@example.org" }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], Value::Bool(true));
    assert_eq!(notifier.events().len(), 1);
}
