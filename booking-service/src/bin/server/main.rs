use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use booking_service::config::Config;
use booking_service::domain::activity::service::ActivityLogService;
use booking_service::domain::booking::service::BookingService;
use booking_service::domain::payment::service::PaymentService;
use booking_service::domain::space::service::SpaceService;
use booking_service::domain::user::service::UserService;
use booking_service::inbound::http::router::create_router;
use booking_service::inbound::http::router::serve;
use booking_service::inbound::http::router::AppState;
use booking_service::inbound::http::router::RouterOptions;
use booking_service::outbound::repositories::PostgresActivityLogRepository;
use booking_service::outbound::repositories::PostgresBookingRepository;
use booking_service::outbound::repositories::PostgresPaymentRepository;
use booking_service::outbound::repositories::PostgresSpaceRepository;
use booking_service::outbound::repositories::PostgresUserRepository;
use booking_service::outbound::seed;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "booking-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        allowed_origins = ?config.server.allowed_origins,
        logs_access = ?config.api.logs_access,
        seed = config.seed.enabled,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    if config.database.reset_on_start {
        seed::reset_database(&pg_pool).await?;
    }

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    if config.seed.enabled {
        seed::run_seeders(&pg_pool, &PasswordHasher::new()).await?;
    }

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));

    let activity_service = Arc::new(ActivityLogService::new(Arc::new(
        PostgresActivityLogRepository::new(pg_pool.clone()),
    )));
    let user_service = Arc::new(UserService::new(
        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        Arc::clone(&activity_service),
        Arc::clone(&authenticator),
    ));
    let space_service = Arc::new(SpaceService::new(Arc::new(PostgresSpaceRepository::new(
        pg_pool.clone(),
    ))));
    let booking_service = Arc::new(BookingService::new(
        Arc::new(PostgresBookingRepository::new(pg_pool.clone())),
        Arc::clone(&activity_service),
    ));
    let payment_service = Arc::new(PaymentService::new(
        Arc::new(PostgresPaymentRepository::new(pg_pool)),
        Arc::clone(&activity_service),
    ));

    let state = AppState {
        user_service,
        space_service,
        booking_service,
        payment_service,
        activity_service,
        authenticator,
    };
    let options = RouterOptions {
        logs_access: config.api.logs_access,
        allowed_origins: config.server.allowed_origins.clone(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    serve(http_listener, create_router(state, &options)).await?;

    tracing::info!("Server exited");
    Ok(())
}
