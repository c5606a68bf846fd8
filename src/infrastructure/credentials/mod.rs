//! Credential provider implementations

mod config_provider;
mod env_provider;

pub use config_provider::ConfigCredentialProvider;
pub use env_provider::EnvCredentialProvider;
