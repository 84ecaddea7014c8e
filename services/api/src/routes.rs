use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use wiria_engage::backend::ConnectivityProbe;
use wiria_engage::workflows::donations::{donation_router, DonationFlow, DonationStore};
use wiria_engage::workflows::membership::{membership_router, MembershipFlow, RenewalStore};
use wiria_engage::workflows::outreach::{outreach_router, OutreachService};
use wiria_engage::workflows::payments::PaymentGateway;

pub(crate) fn with_gateway_routes<G, D, R>(
    outreach: Arc<OutreachService>,
    donations: Arc<DonationFlow<G, D>>,
    membership: Arc<MembershipFlow<G, R>>,
) -> axum::Router
where
    G: PaymentGateway + 'static,
    D: DonationStore + 'static,
    R: RenewalStore + 'static,
{
    outreach_router(outreach)
        .merge(donation_router(donations))
        .merge(membership_router(membership))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route(
            "/connectivity/recheck",
            axum::routing::post(connectivity_recheck_endpoint),
        )
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = json!({
        "status": if ready { "ready" } else { "initializing" },
        "backend_connected": state.connectivity.is_connected(),
    });

    (status, Json(payload))
}

pub(crate) async fn connectivity_recheck_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let connected = state.connectivity.refresh().await;
    (
        StatusCode::OK,
        Json(json!({ "backend_connected": connected })),
    )
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
