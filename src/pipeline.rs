//! Question-answering pipeline: generate -> sanitize -> execute -> rephrase.
//!
//! Each invocation is self-contained; no state is carried between questions.
//! Any step's failure propagates to the caller as a displayable error.

use std::sync::Arc;

use crate::llm::{LanguageModel, prompts, sanitize};
use crate::storage::{QueryOutput, SqliteStore};
use crate::Result;

/// Everything produced for one answered question
#[derive(Debug, Clone, serde::Serialize)]
pub struct QaAnswer {
    pub question: String,
    pub sql: String,
    pub result: QueryOutput,
    pub answer: String,
}

/// Sequences the model and database calls for one question at a time
pub struct QaPipeline {
    model: Arc<dyn LanguageModel>,
}

impl QaPipeline {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Answer a question against the given store. Blocks on two model calls
    /// and one local query execution; no timeout or retry.
    pub async fn ask(&self, store: &mut SqliteStore, question: &str) -> Result<QaAnswer> {
        let schema = store.describe_schema()?;

        let raw = self
            .model
            .complete(&prompts::write_query_prompt(&schema, question))
            .await?;
        let sql = sanitize::clean_sql_response(&raw);
        tracing::debug!("generated query: {}", sql);

        let result = store.execute_query(&sql)?;

        let answer = self
            .model
            .complete(&prompts::answer_prompt(question, &sql, &result.render_compact()))
            .await?;

        Ok(QaAnswer {
            question: question.to_string(),
            sql,
            result,
            answer: answer.trim().to_string(),
        })
    }
}
