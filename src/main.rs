mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, database,
        user_repository::SeaOrmUserRepository,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is read here, so RUST_LOG is available to the subscriber below
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = database::connect(&config.database).await?;
    database::ensure_schema(&db).await?;
    tracing::info!("Database ready");

    let user_repository = SeaOrmUserRepository::new(db);
    let password_hasher = Argon2PasswordHasher::new()?;
    let register_user_usecase =
        RegisterUserUsecase::new(user_repository, password_hasher, config.database.timeout);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", create_user_router(register_user_usecase));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
