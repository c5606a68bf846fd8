use async_trait::async_trait;
use std::collections::HashMap;
use std::env;

use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Credential provider that reads API keys from environment variables
#[derive(Debug)]
pub struct EnvCredentialProvider {
    mappings: HashMap<CredentialType, String>,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    pub fn with_mapping(mut self, credential_type: CredentialType, var: impl Into<String>) -> Self {
        self.mappings.insert(credential_type, var.into());
        self
    }

    /// `COHERE_API_KEY` and `OPENAI_API_KEY`
    pub fn with_defaults(self) -> Self {
        self.with_mapping(CredentialType::Cohere, "COHERE_API_KEY")
            .with_mapping(CredentialType::OpenAi, "OPENAI_API_KEY")
    }

    fn read_key(&self, credential_type: CredentialType) -> Option<String> {
        self.mappings
            .get(&credential_type)
            .and_then(|var| env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new().with_defaults()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: CredentialType,
    ) -> Result<Credential, DomainError> {
        let var = self.mappings.get(&credential_type).ok_or_else(|| {
            DomainError::credential(format!(
                "No environment mapping configured for credential type: {}",
                credential_type
            ))
        })?;

        let api_key = self.read_key(credential_type).ok_or_else(|| {
            DomainError::credential(format!(
                "Environment variable '{}' not set for credential type: {}",
                var, credential_type
            ))
        })?;

        Ok(Credential::new(credential_type, api_key))
    }

    async fn supports(&self, credential_type: CredentialType) -> bool {
        self.read_key(credential_type).is_some()
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}
