//! Role-tagged message templates

use std::collections::HashMap;

use super::template::{PromptTemplate, TemplateError};
use crate::domain::llm::{Message, MessageRole};

const GUIDELINE_SYSTEM_PROMPT: &str = "Act as an experienced geriatrician who works as a consultant for surgeons in geriatric trauma care.";

const GUIDELINE_USER_PROMPT: &str = r#"Clinical practice guideline recommendations:
${var:documents}

Summarize the clinical practice guideline recommendations in no more than 150 words in the context of the query: “${var:query}”
Pay attention to whether the query relates to the preoperative, intraoperative, or postoperative phase or is generally applicable.
Try to structure the summary as an ordered list, ranking the interventions according to relevance and complexity, starting with the most relevant and least complex ones.
Try to structure the summary in pharmacological and non-pharmacological interventions, separating them as two ordered lists.
If the query (“${var:query}”) cannot be answered with the recommendations of the clinical practice guidelines, do not reveal any information about the guidelines or their recommendations, but explain in 1 sentence that you are unable to provide a summary.
If you can answer the query, return the sources word by word in an unordered list under the heading "References". The references should be the last part of your response."#;

/// One message of a chat prompt, before variables are filled in
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    role: MessageRole,
    template: PromptTemplate,
}

impl MessageTemplate {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            template: PromptTemplate::parse(content),
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn render(&self, values: &HashMap<String, String>) -> Result<Message, TemplateError> {
        Ok(Message::new(self.role, self.template.render(values)?))
    }
}

/// Ordered list of message templates rendered together
#[derive(Debug, Clone, Default)]
pub struct ChatPromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages
            .push(MessageTemplate::new(MessageRole::System, content));
        self
    }

    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(MessageTemplate::new(MessageRole::User, content));
        self
    }

    /// Geriatric trauma care consultant prompt. Expects `documents` and
    /// `query`; asks for a trailing "References" section only when the
    /// recommendations answer the query.
    pub fn guideline_summary() -> Self {
        Self::new()
            .system(GUIDELINE_SYSTEM_PROMPT)
            .user(GUIDELINE_USER_PROMPT)
    }

    pub fn messages(&self) -> &[MessageTemplate] {
        &self.messages
    }

    pub fn render(&self, values: &HashMap<String, String>) -> Result<Vec<Message>, TemplateError> {
        self.messages.iter().map(|m| m.render(values)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guideline_prompt_shape() {
        let template = ChatPromptTemplate::guideline_summary();

        assert_eq!(template.messages().len(), 2);
        assert_eq!(template.messages()[0].role(), MessageRole::System);
        assert_eq!(template.messages()[1].role(), MessageRole::User);

        let names: Vec<&str> = template.messages()[1]
            .template()
            .variables()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["documents", "query"]);
    }

    #[test]
    fn test_guideline_prompt_limits_references_to_answerable_queries() {
        let content = ChatPromptTemplate::guideline_summary().messages()[1]
            .template()
            .content()
            .to_string();

        assert!(content.contains("cannot be answered"));
        assert!(content.contains("unable to provide a summary"));
        assert!(content.contains("If you can answer the query"));
        assert!(content.contains("\"References\""));
    }

    #[test]
    fn test_render_requires_all_variables() {
        let template = ChatPromptTemplate::guideline_summary();
        let mut values = HashMap::new();
        values.insert("query".to_string(), "falls".to_string());

        assert!(template.render(&values).is_err());

        values.insert("documents".to_string(), String::new());
        let messages = template.render(&values).unwrap();
        assert!(messages[1].content().contains("“falls”"));
    }
}
