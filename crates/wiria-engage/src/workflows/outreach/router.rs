use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{OutreachKind, OutreachMessage};
use super::service::OutreachService;

/// Router builder exposing the public outreach forms.
pub fn outreach_router(service: Arc<OutreachService>) -> Router {
    Router::new()
        .route("/api/v1/outreach/contact", post(contact_handler))
        .route("/api/v1/outreach/safeguarding", post(safeguarding_handler))
        .route("/api/v1/outreach/newsletter", post(newsletter_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    pub(crate) subject: String,
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SafeguardingRequest {
    /// Reports may be filed anonymously.
    #[serde(default)]
    pub(crate) reporter_name: Option<String>,
    #[serde(default)]
    pub(crate) reporter_email: Option<String>,
    pub(crate) concern: String,
    pub(crate) details: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsletterRequest {
    pub(crate) email: String,
}

pub(crate) async fn contact_handler(
    State(service): State<Arc<OutreachService>>,
    Json(request): Json<ContactRequest>,
) -> Response {
    let message = OutreachMessage {
        kind: OutreachKind::Contact,
        name: request.name,
        email: request.email,
        phone: request.phone,
        subject: request.subject,
        body: request.message,
    };

    let result = service.submit(&message).await;
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn safeguarding_handler(
    State(service): State<Arc<OutreachService>>,
    Json(request): Json<SafeguardingRequest>,
) -> Response {
    let message = OutreachMessage {
        kind: OutreachKind::Safeguarding,
        name: request
            .reporter_name
            .unwrap_or_else(|| "Anonymous".to_string()),
        email: request.reporter_email.unwrap_or_default(),
        phone: None,
        subject: request.concern,
        body: request.details,
    };

    let result = service.submit(&message).await;
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn newsletter_handler(
    State(service): State<Arc<OutreachService>>,
    Json(request): Json<NewsletterRequest>,
) -> Response {
    let message = OutreachMessage {
        kind: OutreachKind::Newsletter,
        name: String::new(),
        email: request.email.clone(),
        phone: None,
        subject: "Newsletter signup".to_string(),
        body: format!("Please add {} to the newsletter list.", request.email),
    };

    let result = service.submit(&message).await;
    (StatusCode::OK, Json(result)).into_response()
}
