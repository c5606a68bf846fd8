//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Rendering is a single pass over the template, so substituted values are
//! never scanned for further placeholders.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::domain::DomainError;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

impl From<TemplateError> for DomainError {
    fn from(err: TemplateError) -> Self {
        DomainError::template(err.to_string())
    }
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
    /// Whether the variable is required (no default)
    pub required: bool,
}

impl PromptVariable {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: true,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            required: false,
        }
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen_names = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen_names.insert(name.clone()) {
                continue;
            }

            let variable = match cap.get(2) {
                Some(default) => PromptVariable::with_default(&name, default.as_str()),
                None => PromptVariable::required(&name),
            };

            variables.push(variable);
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Get only required variables (no default value)
    pub fn required_variables(&self) -> Vec<&PromptVariable> {
        self.variables.iter().filter(|v| v.required).collect()
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .required_variables()
            .into_iter()
            .find(|v| !values.contains_key(&v.name))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            values
                .get(&cap[1])
                .cloned()
                .or_else(|| cap.get(2).map(|d| d.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_parse_required_and_default() {
        let template = PromptTemplate::parse("${var:query} in ${var:phase:any phase}");

        assert_eq!(template.variables().len(), 2);
        assert_eq!(template.required_variables().len(), 1);
        assert_eq!(
            template.variables()[1].default,
            Some("any phase".to_string())
        );
    }

    #[test]
    fn test_parse_duplicate_variables() {
        let template = PromptTemplate::parse("“${var:query}” and again (“${var:query}”)");
        assert_eq!(template.variables().len(), 1);
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = PromptTemplate::parse("“${var:query}” and again (“${var:query}”)");

        let result = template.render(&values(&[("query", "delirium")])).unwrap();
        assert_eq!(result, "“delirium” and again (“delirium”)");
    }

    #[test]
    fn test_render_missing_required_variable() {
        let template = PromptTemplate::parse("Hello, ${var:name}!");

        let result = template.render(&HashMap::new());
        assert_eq!(
            result,
            Err(TemplateError::MissingVariable {
                name: "name".to_string()
            })
        );
    }

    #[test]
    fn test_render_with_default() {
        let template = PromptTemplate::parse("Hello, ${var:name:World}!");

        assert_eq!(template.render(&HashMap::new()).unwrap(), "Hello, World!");
        assert_eq!(
            template.render(&values(&[("name", "Alice")])).unwrap(),
            "Hello, Alice!"
        );
    }

    #[test]
    fn test_substituted_values_are_not_rendered_again() {
        let template = PromptTemplate::parse("${var:documents}\nQuery: ${var:query}");

        let result = template
            .render(&values(&[
                ("documents", "Text mentioning ${var:query}"),
                ("query", "falls"),
            ]))
            .unwrap();

        assert_eq!(result, "Text mentioning ${var:query}\nQuery: falls");
    }

    #[test]
    fn test_variable_names_with_separators() {
        let template = PromptTemplate::parse("${var:user-name} ${var:user_role}");

        assert_eq!(template.variables()[0].name, "user-name");
        assert_eq!(template.variables()[1].name, "user_role");
    }
}
