mod credential;
mod provider;

pub use credential::{Credential, CredentialType};
pub use provider::CredentialProvider;
