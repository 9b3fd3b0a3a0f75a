//! Mock notebook AI answer backend.
//!
//! Returns deterministic canned answers in the shape the production
//! notebook service will produce, so the chat contract can be exercised
//! end to end before the real integration lands.

use async_trait::async_trait;
use tracing::debug;

use curator_core::{AnswerBackend, AnswerReply, Citation, Result};

/// Environment variable naming the notebook to answer from.
pub const NOTEBOOK_ID_ENV: &str = "NOTEBOOK_ID";

/// Mock answer backend with configurable canned output.
#[derive(Debug, Clone)]
pub struct MockNotebookBackend {
    notebook_id: Option<String>,
    citation: Citation,
    suggested_queries: Vec<String>,
}

impl MockNotebookBackend {
    /// Create a mock backend with the default canned reply.
    pub fn new() -> Self {
        Self {
            notebook_id: None,
            citation: Citation {
                source_id: "mock-source-1".to_string(),
                source_title: "Marketing Report Q3.pdf".to_string(),
                text: "This is a sample citation from a source document.".to_string(),
                page: Some(15),
            },
            suggested_queries: vec![
                "Summarize the B2B strategy".to_string(),
                "List the main competitors".to_string(),
                "Market trends for Q4".to_string(),
            ],
        }
    }

    /// Create a mock backend configured from the environment.
    ///
    /// Reads [`NOTEBOOK_ID_ENV`]; an unset or empty value leaves the
    /// notebook id unconfigured, which the mock tolerates.
    pub fn from_env() -> Self {
        let notebook_id = std::env::var(NOTEBOOK_ID_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self {
            notebook_id,
            ..Self::new()
        }
    }

    /// Override the canned citation.
    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citation = citation;
        self
    }

    /// Override the suggested follow-up queries.
    pub fn with_suggested_queries(mut self, queries: Vec<String>) -> Self {
        self.suggested_queries = queries;
        self
    }

    /// The configured notebook id, if any.
    pub fn notebook_id(&self) -> Option<&str> {
        self.notebook_id.as_deref()
    }
}

impl Default for MockNotebookBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerBackend for MockNotebookBackend {
    async fn ask(&self, query: &str, source_ids: Option<&[String]>) -> Result<AnswerReply> {
        debug!(
            subsystem = "connect",
            component = "notebook",
            op = "ask",
            query = %query,
            source_count = source_ids.map(|s| s.len()).unwrap_or(0),
            "Answering query with canned reply"
        );

        Ok(AnswerReply {
            answer: format!(
                "This is a sample answer for: '{query}'. In the full version, \
                 answers will be generated by the notebook AI service."
            ),
            citations: vec![self.citation.clone()],
            suggested_queries: self.suggested_queries.clone(),
        })
    }

    fn backend_name(&self) -> &str {
        "mock-notebook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_embeds_query_in_answer() {
        let backend = MockNotebookBackend::new();
        let reply = backend.ask("What is the Q4 plan?", None).await.unwrap();

        assert!(reply.answer.contains("What is the Q4 plan?"));
        assert_eq!(reply.citations.len(), 1);
        assert_eq!(reply.citations[0].source_id, "mock-source-1");
        assert_eq!(reply.suggested_queries.len(), 3);
    }

    #[tokio::test]
    async fn test_ask_ignores_source_scope_but_accepts_it() {
        let backend = MockNotebookBackend::new();
        let sources = vec!["doc-1".to_string(), "doc-2".to_string()];
        let reply = backend.ask("scoped query", Some(&sources)).await.unwrap();

        assert!(reply.answer.contains("scoped query"));
    }

    #[tokio::test]
    async fn test_builder_overrides() {
        let backend = MockNotebookBackend::new()
            .with_suggested_queries(vec!["only one".to_string()]);
        let reply = backend.ask("q????", None).await.unwrap();
        assert_eq!(reply.suggested_queries, vec!["only one".to_string()]);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(MockNotebookBackend::new().backend_name(), "mock-notebook");
    }
}
