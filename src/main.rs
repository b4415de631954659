//! Course marketplace API server.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use course_marketplace::adapters::auth::{
    ClerkBackendConfig, ClerkConfig, ClerkIdentityProvider, ClerkSessionValidator,
};
use course_marketplace::adapters::cache::CourseCatalogCache;
use course_marketplace::adapters::http::{build_router, AppState};
use course_marketplace::adapters::postgres::{
    run_migrations, PostgresCourseRepository, PostgresEnrollmentReader,
    PostgresPurchaseRepository, PostgresUserRepository,
};
use course_marketplace::adapters::stripe::{StripeCheckoutAdapter, StripeConfig};
use course_marketplace::application::handlers::CheckoutRedirects;
use course_marketplace::config::{AppConfig, ServerConfig};
use course_marketplace::domain::webhook::{
    StripeSignatureVerifier, SvixSignatureVerifier, TimestampWindow,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    tracing::info!(
        environment = ?config.server.environment,
        port = config.server.port,
        "Loaded configuration"
    );

    // --- Database ---
    let pool = config
        .database
        .pool_options()
        .connect(config.database.connection_url())
        .await?;
    tracing::info!("Database connection pool created");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    // --- Adapters ---
    let courses = Arc::new(CourseCatalogCache::new(
        Arc::new(PostgresCourseRepository::new(pool.clone())),
        config.catalog.cache_ttl(),
    ));

    let mut clerk = ClerkConfig::new(config.auth.clerk_issuer_url.clone())
        .with_cache_duration(config.auth.jwks_cache_ttl())
        .with_authorized_parties(config.auth.authorized_parties_list());
    if let Some(audience) = &config.auth.clerk_audience {
        clerk = clerk.with_audience(audience.clone());
    }

    let identity_provider = ClerkIdentityProvider::new(
        ClerkBackendConfig::new(config.auth.secret_key.clone())
            .with_base_url(config.auth.api_url.clone()),
    );

    let window = TimestampWindow::with_tolerance(config.payment.webhook_tolerance_secs);
    let stripe_verifier = StripeSignatureVerifier::new(config.payment.stripe_webhook_secret.clone())
        .with_window(window);
    let svix_verifier = SvixSignatureVerifier::new(&config.auth.webhook_secret)?.with_window(window);

    let gateway = StripeCheckoutAdapter::new(
        StripeConfig::new(config.payment.stripe_api_key.clone())
            .with_currency(config.payment.currency.clone()),
    );

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        courses,
        purchases: Arc::new(PostgresPurchaseRepository::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentReader::new(pool)),
        payment_gateway: Arc::new(gateway),
        session_validator: Arc::new(ClerkSessionValidator::new(clerk)),
        identity_provider: Arc::new(identity_provider),
        stripe_verifier: Arc::new(stripe_verifier),
        svix_verifier: Arc::new(svix_verifier),
        checkout_redirects: CheckoutRedirects::for_frontend(&config.payment.frontend_url),
    };

    // --- Server ---
    let app = build_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable logs elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
