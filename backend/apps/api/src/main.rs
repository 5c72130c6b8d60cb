//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::PgUserRepository;
use auth::config::AuthConfig;
use auth::middleware::{PrincipalState, resolve_principal};
use auth::{auth_router, users_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use platform::mailer::TracingMailer;
use reviews::PgReviewsRepository;
use reviews::{categories_router, genres_router, titles_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,reviews=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = Arc::new(match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret) => AuthConfig::from_secret_str(&secret),
        Err(_) if cfg!(debug_assertions) => AuthConfig::development(),
        Err(_) => anyhow::bail!("AUTH_TOKEN_SECRET must be set in production"),
    });

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let reviews_repo = Arc::new(PgReviewsRepository::new(pool.clone()));
    let mailer = Arc::new(TracingMailer);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router; every route sees a resolved principal
    let principal_state = PrincipalState {
        repo: user_repo.clone(),
        config: auth_config.clone(),
    };

    let api = Router::new()
        .nest(
            "/auth",
            auth_router(user_repo.clone(), mailer.clone(), auth_config.clone()),
        )
        .nest(
            "/users",
            users_router(user_repo.clone(), mailer.clone(), auth_config.clone()),
        )
        .nest("/categories", categories_router(reviews_repo.clone()))
        .nest("/genres", genres_router(reviews_repo.clone()))
        .nest("/titles", titles_router(reviews_repo.clone()))
        .layer(axum::middleware::from_fn_with_state(
            principal_state,
            resolve_principal::<PgUserRepository>,
        ));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
