use crate::cli::ServeArgs;
use crate::infra::{default_fee_schedule, AppState, InMemoryDonationStore, InMemoryRenewalStore};
use crate::routes::with_gateway_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wiria_engage::backend::{BackendClient, HealthMonitor};
use wiria_engage::config::AppConfig;
use wiria_engage::error::AppError;
use wiria_engage::notify::NotificationCenter;
use wiria_engage::telemetry;
use wiria_engage::workflows::donations::DonationFlow;
use wiria_engage::workflows::membership::MembershipFlow;
use wiria_engage::workflows::outreach::{
    BackendChannel, DeliveryChannel, EmailChannel, OutreachService,
};
use wiria_engage::workflows::payments::HttpPaymentGateway;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let backend_client = Arc::new(BackendClient::new(&config.backend)?);
    let connectivity = Arc::new(HealthMonitor::new(&config.backend)?);
    let notifier = Arc::new(NotificationCenter::new());

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        connectivity: connectivity.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let channels: Vec<Arc<dyn DeliveryChannel>> = vec![
        Arc::new(BackendChannel::new(
            backend_client.clone(),
            connectivity.clone(),
        )),
        Arc::new(EmailChannel::from_config(
            config.emailjs.clone(),
            config.backend.request_timeout(),
        )?),
    ];
    let outreach = Arc::new(OutreachService::new(
        channels,
        config.organization.clone(),
        notifier.clone(),
    ));

    let gateway = Arc::new(HttpPaymentGateway::new(backend_client));
    let donations = Arc::new(DonationFlow::new(
        gateway.clone(),
        Arc::new(InMemoryDonationStore::default()),
        notifier.clone(),
    ));
    let membership = Arc::new(MembershipFlow::new(
        gateway,
        Arc::new(InMemoryRenewalStore::default()),
        default_fee_schedule(),
        notifier,
    ));

    let app = with_gateway_routes(outreach, donations, membership)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let backend_up = connectivity.refresh().await;
    info!(backend_up, backend = %config.backend.base_url, "initial backend health probe");

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "engagement gateway ready");

    axum::serve(listener, app).await?;
    Ok(())
}
