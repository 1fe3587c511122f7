use std::sync::Arc;

use auth::JwtHandler;
use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::identity::ports::CredentialStore;
use identity_service::identity::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::router::AppState;
use identity_service::inbound::http::session::SessionCodec;
use identity_service::seed::seed_users;
use identity_service::store::PostgresCredentialStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_secs = config.jwt.access_ttl_secs,
        refresh_ttl_secs = config.jwt.refresh_ttl_secs,
        secure_cookies = config.session.secure_cookies,
        "Configuration loaded"
    );

    // Bounded connect-with-retry happens inside; exhausting it is fatal,
    // since the process cannot serve without a store.
    let store = PostgresCredentialStore::connect(&config.store.url).await?;
    let store: Arc<dyn CredentialStore> = Arc::new(store);

    seed_users(store.as_ref()).await?;

    let issuer = TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_ttl_secs,
        config.jwt.refresh_ttl_secs,
    );
    let jwt = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));
    let service = Arc::new(AuthService::new(Arc::clone(&store), issuer));
    let sessions = SessionCodec::new(&config.session.key, config.session.secure_cookies);

    let router = create_router(AppState {
        service,
        jwt,
        sessions,
    });

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, protocol = "http", "Http server listening");

    axum::serve(listener, router).await?;

    store.close().await;

    Ok(())
}
