use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{DonationRequest, DonationStore};
use super::service::{DonationError, DonationFlow};
use crate::workflows::payments::PaymentGateway;

/// Router builder exposing donation intake and status polling.
pub fn donation_router<G, S>(flow: Arc<DonationFlow<G, S>>) -> Router
where
    G: PaymentGateway + 'static,
    S: DonationStore + 'static,
{
    Router::new()
        .route("/api/v1/donations", post(submit_handler::<G, S>))
        .route(
            "/api/v1/donations/:donation_id/status",
            get(status_handler::<G, S>),
        )
        .with_state(flow)
}

pub(crate) async fn submit_handler<G, S>(
    State(flow): State<Arc<DonationFlow<G, S>>>,
    Json(request): Json<DonationRequest>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: DonationStore + 'static,
{
    match flow.submit(request).await {
        Ok(session) => (StatusCode::ACCEPTED, Json(session.view())).into_response(),
        Err(DonationError::Invalid(reason)) => {
            let payload = json!({ "error": reason });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(DonationError::Backend(_)) => {
            let payload = json!({
                "error": "unable to process the donation right now, please try again",
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<G, S>(
    State(flow): State<Arc<DonationFlow<G, S>>>,
    Path(donation_id): Path<String>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: DonationStore + 'static,
{
    match flow.check_status(&donation_id).await {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(DonationError::NotFound) => {
            let payload = json!({ "error": "donation not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
