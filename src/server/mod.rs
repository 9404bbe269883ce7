pub mod app;
pub mod error;
pub mod handlers;
pub mod pages;

use crate::config::Settings;
use crate::database::{connection::*, migrations::Migrator};
use anyhow::Result;
use sea_orm_migration::MigratorTrait;
use tracing::info;

pub async fn start_server(settings: &Settings) -> Result<()> {
    let database_url = get_database_url(Some(&settings.database.path));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let messages = settings.load_messages()?;
    let state = app::AppState::new(db, messages, &settings.reports)?;
    let app = app::create_app_with_state(state, settings.server.cors_origin.as_deref())?;

    log_routes();

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("Routes:");
    info!("  /health                     - Health check");
    info!("  /groups, /persons           - Listing pages");
    info!("  /groups/edit?id=N           - Group edit page (GET, POST)");
    info!("  /persons/edit?id=N          - Person edit page (GET, POST)");
    info!("  /files/:name                - File blobs (GET, PUT, DELETE)");
}
