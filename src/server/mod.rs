use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::llm::LanguageModel;
use crate::pipeline::QaPipeline;
use crate::storage::SqliteStore;

pub mod routes;

/// Server state. The store mutex serializes question pipelines: one
/// interaction runs at a time, matching the single-connection read model.
pub struct AppState {
    pub store: Mutex<SqliteStore>,
    pub pipeline: QaPipeline,
}

pub async fn start_server(
    port: u16,
    database_path: PathBuf,
    model: Arc<dyn LanguageModel>,
) -> anyhow::Result<()> {
    if !database_path.exists() {
        anyhow::bail!(
            "Database file '{}' not found. Run `askdb ingest` first.",
            database_path.display()
        );
    }

    let store = SqliteStore::open(&database_path)?;
    let state = Arc::new(AppState {
        store: Mutex::new(store),
        pipeline: QaPipeline::new(model),
    });

    let app = Router::new()
        .route("/", get(routes::handle_index))
        .route("/api/examples", get(routes::handle_examples))
        .route("/api/tables", get(routes::handle_tables))
        .route("/api/ask", post(routes::handle_ask))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
