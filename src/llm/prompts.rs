//! Prompt templates for query generation and answer rephrasing.

/// Fixed example questions shown in the web sidebar.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "What is my total sales?",
    "What is the total ad spend?",
    "Calculate the RoAS (Return on Ad Spend)",
    "Which product had the highest CPC (Cost Per Click)?",
    "How many unique products are there in the ad sales data?",
];

/// Row cap suggested to the model for open-ended questions.
const TOP_K: usize = 5;

/// Prompt asking the model for a SQLite query answering `question` against
/// the given schema description.
pub fn write_query_prompt(schema: &str, question: &str) -> String {
    format!(
        r#"You are a SQLite expert. Given an input question, create a single syntactically correct SQLite query to run.
Unless the question specifies otherwise, limit your query to at most {TOP_K} results.
Never query for all columns from a table; only select the columns needed to answer the question.
Pay attention to use only the column names you can see in the tables below.

Only use the following tables:

{schema}

Use the following format:

Question: question here
SQLQuery: SQL query to run

Question: {question}
SQLQuery: "#
    )
}

/// Prompt asking the model to rephrase a SQL result as a plain answer.
pub fn answer_prompt(question: &str, query: &str, result: &str) -> String {
    format!(
        r#"Given the user's question, the corresponding SQL query, and the SQL result, answer the user's question in a clear, human-readable format.

Question: {question}
SQL Query: {query}
SQL Result: {result}
Answer: "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_prompt_carries_schema_and_question() {
        let prompt = write_query_prompt("CREATE TABLE t (x INTEGER)", "how many rows?");
        assert!(prompt.contains("CREATE TABLE t (x INTEGER)"));
        assert!(prompt.contains("Question: how many rows?"));
        assert!(prompt.ends_with("SQLQuery: "));
    }

    #[test]
    fn test_answer_prompt_carries_all_parts() {
        let prompt = answer_prompt("total?", "SELECT SUM(x) FROM t", "[(42)]");
        assert!(prompt.contains("Question: total?"));
        assert!(prompt.contains("SQL Query: SELECT SUM(x) FROM t"));
        assert!(prompt.contains("SQL Result: [(42)]"));
    }
}
