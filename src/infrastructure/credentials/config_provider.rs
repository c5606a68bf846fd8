use async_trait::async_trait;
use std::collections::HashMap;

use super::EnvCredentialProvider;
use crate::domain::{Credential, CredentialProvider, CredentialType, DomainError};

/// Keys from the loaded configuration, falling back to the environment
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    keys: HashMap<CredentialType, String>,
    fallback: EnvCredentialProvider,
}

impl ConfigCredentialProvider {
    pub fn new(fallback: EnvCredentialProvider) -> Self {
        Self {
            keys: HashMap::new(),
            fallback,
        }
    }

    /// Register a configured key; `None` or blank keys are ignored
    pub fn with_key(mut self, credential_type: CredentialType, key: Option<&str>) -> Self {
        if let Some(key) = key.map(str::trim).filter(|k| !k.is_empty()) {
            self.keys.insert(credential_type, key.to_string());
        }
        self
    }
}

#[async_trait]
impl CredentialProvider for ConfigCredentialProvider {
    async fn get_credential(
        &self,
        credential_type: CredentialType,
    ) -> Result<Credential, DomainError> {
        match self.keys.get(&credential_type) {
            Some(key) => Ok(Credential::new(credential_type, key.clone())),
            None => self.fallback.get_credential(credential_type).await,
        }
    }

    async fn supports(&self, credential_type: CredentialType) -> bool {
        self.keys.contains_key(&credential_type) || self.fallback.supports(credential_type).await
    }

    fn provider_name(&self) -> &'static str {
        "config"
    }
}
