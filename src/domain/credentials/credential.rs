use std::fmt;

use serde::{Deserialize, Serialize};

/// External service a credential belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    Cohere,
    OpenAi,
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialType::Cohere => write!(f, "cohere"),
            CredentialType::OpenAi => write!(f, "openai"),
        }
    }
}

/// Bearer credential for an external service
#[derive(Clone)]
pub struct Credential {
    credential_type: CredentialType,
    api_key: String,
}

impl Credential {
    pub fn new(credential_type: CredentialType, api_key: impl Into<String>) -> Self {
        Self {
            credential_type,
            api_key: api_key.into(),
        }
    }

    pub fn credential_type(&self) -> CredentialType {
        self.credential_type
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keeps keys out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("api_key", &"***")
            .finish()
    }
}
