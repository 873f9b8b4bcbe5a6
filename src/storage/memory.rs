use crate::{
    error::{Result, TitanError},
    storage::{traits::CredentialStore, Credential},
};
use async_trait::async_trait;
use std::sync::Mutex;

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            value: Mutex::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<Credential>> {
        let value = self
            .value
            .lock()
            .map_err(|e| TitanError::StorageError(e.to_string()))?;
        Ok(value.clone())
    }

    async fn set(&self, credential: &Credential) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| TitanError::StorageError(e.to_string()))?;
        *value = Some(credential.clone());
        Ok(())
    }
}
