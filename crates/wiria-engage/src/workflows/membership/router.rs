use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MembershipType, RegistrationForm, RenewalForm, RenewalStore};
use super::service::{MembershipError, MembershipFlow};
use crate::workflows::payments::PaymentGateway;

/// Router builder exposing registration, renewal, status polling, and fee
/// quotes.
pub fn membership_router<G, S>(flow: Arc<MembershipFlow<G, S>>) -> Router
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    Router::new()
        .route("/api/v1/membership/register", post(register_handler::<G, S>))
        .route("/api/v1/membership/renew", post(renew_handler::<G, S>))
        .route(
            "/api/v1/membership/renewals/:renewal_id/status",
            get(renewal_status_handler::<G, S>),
        )
        .route(
            "/api/v1/membership/fees/registration",
            get(registration_quote_handler::<G, S>),
        )
        .route(
            "/api/v1/membership/fees/renewal",
            get(renewal_quote_handler::<G, S>),
        )
        .with_state(flow)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationQuoteParams {
    pub(crate) membership_type: MembershipType,
    #[serde(default)]
    pub(crate) members: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenewalQuoteParams {
    pub(crate) membership_type: MembershipType,
    #[serde(default)]
    pub(crate) members: u32,
    #[serde(default)]
    pub(crate) previous_max: u32,
}

fn membership_error_response(error: MembershipError) -> Response {
    match error {
        MembershipError::Invalid(reason) => {
            let payload = json!({ "error": reason });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        MembershipError::Backend(_) => {
            let payload = json!({
                "error": "unable to reach the membership service right now, please try again",
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        MembershipError::NotFound => {
            let payload = json!({ "error": "renewal not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<G, S>(
    State(flow): State<Arc<MembershipFlow<G, S>>>,
    Json(form): Json<RegistrationForm>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    match flow.register(form).await {
        Ok(outcome) => (StatusCode::ACCEPTED, Json(outcome)).into_response(),
        Err(error) => membership_error_response(error),
    }
}

pub(crate) async fn renew_handler<G, S>(
    State(flow): State<Arc<MembershipFlow<G, S>>>,
    Json(form): Json<RenewalForm>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    match flow.renew(form).await {
        Ok(session) => (StatusCode::ACCEPTED, Json(session.view())).into_response(),
        Err(error) => membership_error_response(error),
    }
}

pub(crate) async fn renewal_status_handler<G, S>(
    State(flow): State<Arc<MembershipFlow<G, S>>>,
    Path(renewal_id): Path<String>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    match flow.check_renewal_status(&renewal_id).await {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => membership_error_response(error),
    }
}

pub(crate) async fn registration_quote_handler<G, S>(
    State(flow): State<Arc<MembershipFlow<G, S>>>,
    Query(params): Query<RegistrationQuoteParams>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    let quote = flow.registration_quote(params.membership_type, params.members);
    (StatusCode::OK, Json(quote)).into_response()
}

pub(crate) async fn renewal_quote_handler<G, S>(
    State(flow): State<Arc<MembershipFlow<G, S>>>,
    Query(params): Query<RenewalQuoteParams>,
) -> Response
where
    G: PaymentGateway + 'static,
    S: RenewalStore + 'static,
{
    let quote = flow.renewal_quote(params.membership_type, params.members, params.previous_max);
    (StatusCode::OK, Json(quote)).into_response()
}
