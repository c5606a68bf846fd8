//! Turns retrieved documents and the user query into chat messages

use std::collections::HashMap;

use super::ChatPromptTemplate;
use crate::domain::llm::Message;
use crate::domain::store::Document;
use crate::domain::DomainError;

pub const QUERY_VARIABLE: &str = "query";
pub const DOCUMENTS_VARIABLE: &str = "documents";

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: ChatPromptTemplate,
}

impl PromptBuilder {
    pub fn new(template: ChatPromptTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &ChatPromptTemplate {
        &self.template
    }

    pub fn build(&self, query: &str, documents: &[Document]) -> Result<Vec<Message>, DomainError> {
        let mut values = HashMap::new();
        values.insert(QUERY_VARIABLE.to_string(), query.to_string());
        values.insert(DOCUMENTS_VARIABLE.to_string(), format_documents(documents));

        Ok(self.template.render(&values)?)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(ChatPromptTemplate::guideline_summary())
    }
}

/// One block per document: the text, then its citation
pub fn format_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("{}\nSource: {}", doc.content(), doc.source().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
