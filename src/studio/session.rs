use crate::{
    config::GeminiConfig,
    error::Result,
    storage::{Credential, CredentialStore},
};

pub const CREDENTIAL_SAVED: &str = "API key berhasil disimpan di browser kamu ✅";

/// Per-user state threaded into the studio instead of living in a global.
#[derive(Debug, Clone, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    pub fn new(credential: Option<Credential>) -> Self {
        Self { credential }
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self::new(Some(credential))
    }

    /// Reads the store once; falls back to a key from the environment.
    pub async fn load(store: &dyn CredentialStore, config: &GeminiConfig) -> Result<Self> {
        if let Some(credential) = store.get().await? {
            log::debug!("Loaded stored credential {}", credential.masked());
            return Ok(Self::with_credential(credential));
        }

        let fallback = config
            .api_key
            .as_deref()
            .and_then(|key| Credential::new(key).ok());
        if fallback.is_some() {
            log::info!("No stored API key, using the one from the environment");
        }
        Ok(Self::new(fallback))
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Trims, persists, then swaps the session credential.
    pub async fn save_credential(
        &mut self,
        store: &dyn CredentialStore,
        raw: &str,
    ) -> Result<&'static str> {
        let credential = Credential::new(raw)?;
        store.set(&credential).await?;
        log::info!("API key {} saved", credential.masked());
        self.credential = Some(credential);
        Ok(CREDENTIAL_SAVED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TitanError;
    use crate::storage::MemoryCredentialStore;

    #[tokio::test]
    async fn test_load_prefers_store() {
        let store = MemoryCredentialStore::with_credential(Credential::new("stored").unwrap());
        let config = GeminiConfig::new().with_api_key("from-env");

        let session = Session::load(&store, &config).await.unwrap();
        assert_eq!(session.credential().unwrap().as_str(), "stored");
    }

    #[tokio::test]
    async fn test_load_falls_back_to_environment_key() {
        let store = MemoryCredentialStore::new();
        let config = GeminiConfig::new().with_api_key("from-env");
        let session = Session::load(&store, &config).await.unwrap();
        assert_eq!(session.credential().unwrap().as_str(), "from-env");

        let session = Session::load(&store, &GeminiConfig::new()).await.unwrap();
        assert!(!session.has_credential());
    }

    #[tokio::test]
    async fn test_save_trims_and_persists() {
        let store = MemoryCredentialStore::new();
        let mut session = Session::default();

        let message = session.save_credential(&store, "  AIza-123  ").await.unwrap();
        assert_eq!(message, CREDENTIAL_SAVED);
        assert_eq!(session.credential().unwrap().as_str(), "AIza-123");
        assert_eq!(store.get().await.unwrap().unwrap().as_str(), "AIza-123");
    }

    #[tokio::test]
    async fn test_save_rejects_blank_key_and_keeps_old_one() {
        let store = MemoryCredentialStore::new();
        let mut session = Session::with_credential(Credential::new("old").unwrap());

        let result = session.save_credential(&store, "   ").await;
        assert!(matches!(result, Err(TitanError::EmptyCredential)));
        assert_eq!(session.credential().unwrap().as_str(), "old");
        assert!(store.get().await.unwrap().is_none());
    }
}
