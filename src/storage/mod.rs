//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file holding one table per ingested
//! source export. Tables are fully replaced on each ingestion run; the
//! question-answering surface only reads.

pub mod sqlite;

pub use sqlite::{QueryOutput, SqliteStore};
