use crate::{error::Result, storage::Credential};
use async_trait::async_trait;

/// Name of the single persisted key.
pub const CREDENTIAL_KEY: &str = "titan_api_key";

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> Result<Option<Credential>>;
    async fn set(&self, credential: &Credential) -> Result<()>;
}
