use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryMediaStore, InMemoryProfileStore, InMemoryWalletService};
use crate::routes::with_onboarding_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use driver_onboard::config::AppConfig;
use driver_onboard::error::AppError;
use driver_onboard::telemetry;
use driver_onboard::workflows::onboarding::OnboardingService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(currency) = args.wallet_currency.take() {
        config.onboarding.wallet_currency = currency.to_ascii_uppercase();
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let profiles = Arc::new(InMemoryProfileStore::default());
    let wallets = Arc::new(InMemoryWalletService::default());
    let media = Arc::new(InMemoryMediaStore::default());
    let onboarding_service = Arc::new(OnboardingService::new(
        profiles,
        wallets,
        media,
        config.onboarding.submission_settings(),
        config.onboarding.upload_policy(),
    ));

    let app = with_onboarding_routes(onboarding_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        wallet_currency = %config.onboarding.wallet_currency,
        max_upload_mb = config.onboarding.max_upload_mb,
        "driver onboarding service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
