use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::llm::prompts::EXAMPLE_QUESTIONS;
use crate::pipeline::QaAnswer;
use crate::server::AppState;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn handle_index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

pub async fn handle_examples() -> Json<Vec<&'static str>> {
    Json(EXAMPLE_QUESTIONS.to_vec())
}

pub async fn handle_tables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let counts = store
        .table_counts()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    let tables: Vec<serde_json::Value> = counts
        .into_iter()
        .map(|(name, rows)| serde_json::json!({ "table": name, "rows": rows }))
        .collect();
    Ok(Json(serde_json::Value::Array(tables)))
}

pub async fn handle_ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<QaAnswer>, (StatusCode, Json<ErrorResponse>)> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "Please enter a question.".to_string() }),
        ));
    }

    // Held across the model calls: one pipeline at a time.
    let mut store = state.store.lock().await;
    let answer = state
        .pipeline
        .ask(&mut store, question)
        .await
        .map_err(|e| {
            tracing::warn!("pipeline failed for question '{}': {}", question, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: format!("An error occurred: {e}") }),
            )
        })?;

    Ok(Json(answer))
}
