use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use clinic_scheduler_api::{app, config::Config, jobs, middleware, services::Mailer};
use domain::store::NotificationQueue;
use persistence::repositories::NotificationJobRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Clinic Scheduler API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Start background jobs: notification dispatch and retention cleanup
    let queue: Arc<dyn NotificationQueue> =
        Arc::new(NotificationJobRepository::new(pool.clone()));
    let mailer = Mailer::new(config.notifications.clone());

    let mut scheduler = jobs::JobScheduler::new();
    scheduler.register(jobs::NotificationDispatchJob::new(
        queue.clone(),
        mailer,
        config.notifications.dispatch_batch_size,
    ));
    scheduler.register(jobs::NotificationCleanupJob::new(
        queue,
        Some(config.notifications.job_retention_days),
    ));
    scheduler.start();

    // Build application
    let app = app::create_app(config.clone(), pool);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Drain background jobs once the server stops accepting connections
    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}
