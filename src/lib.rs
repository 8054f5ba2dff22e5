//! # Askdb - Natural-language question answering over a local sales database
//!
//! Askdb provides:
//! - A batch ingestion utility that loads CSV exports into SQLite, replacing
//!   any prior table of the same name
//! - A question-answering pipeline that asks a hosted language model for a
//!   SQL query, sanitizes the raw completion, executes it locally, and asks
//!   the model to rephrase the result as a human-readable answer
//! - An embedded single-page web surface and a one-shot CLI for that pipeline

pub mod config;
pub mod ingest;
pub mod llm;
pub mod pipeline;
pub mod server;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use llm::sanitize::clean_sql_response;
pub use llm::{GeminiClient, LanguageModel};
pub use pipeline::{QaAnswer, QaPipeline};
pub use storage::{QueryOutput, SqliteStore};

/// Result type alias for Askdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Askdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model error: {0}")]
    Model(String),

    #[error("No API key found: set {0}")]
    MissingApiKey(&'static str),
}
