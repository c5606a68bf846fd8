//! Prompt templates and the chat prompt builder

mod builder;
mod chat_template;
mod template;

pub use builder::{format_documents, PromptBuilder, DOCUMENTS_VARIABLE, QUERY_VARIABLE};
pub use chat_template::{ChatPromptTemplate, MessageTemplate};
pub use template::{PromptTemplate, PromptVariable, TemplateError};
