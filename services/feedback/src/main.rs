use std::sync::Arc;

use anyhow::Result;
use sqlx::migrate::Migrator;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use feedback::repositories::{FeedbackRepository, UserRepository};
use feedback::routes;
use feedback::session::SessionStore;
use feedback::state::AppState;

static MIGRATOR: Migrator = sqlx::migrate!();

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting feedback service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool, &MIGRATOR).await?;

    info!("Feedback service initialized successfully");

    let app_state = AppState {
        users: Arc::new(UserRepository::new(pool.clone())),
        feedback: Arc::new(FeedbackRepository::new(pool)),
        sessions: SessionStore::new(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Feedback service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
