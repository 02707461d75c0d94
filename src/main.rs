use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use user_manage_api::{
    auth::{Authorization, JwtService},
    config::AppConfig,
    create_router, db,
    users::{PgUserRepository, UserRepository, UserService},
    AppState, BASE_PATH,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("User Management API - Starting...");

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    let repository = PgUserRepository::new(db_pool, config.users_table.clone());
    repository
        .create_table(&config.users_table)
        .await
        .expect("Failed to create users table");

    let auth: Arc<dyn Authorization> = Arc::new(JwtService::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_secs,
    ));

    let state = AppState {
        users: UserService::new(Arc::new(repository)),
        auth,
    };

    let app = create_router(state);

    // Start the Axum server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("User Management API is running on http://{}{}", addr, BASE_PATH);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
