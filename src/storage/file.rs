use crate::{
    error::{Result, TitanError},
    storage::{
        traits::{CredentialStore, CREDENTIAL_KEY},
        Credential,
    },
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// JSON key-value file, the on-disk counterpart of browser local storage.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw)
            .map_err(|e| TitanError::SerializationError(e.to_string()))?
        {
            Value::Object(entries) => Ok(entries),
            _ => Err(TitanError::StorageError(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<Credential>> {
        let entries = self.read_entries().await?;
        Ok(entries
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .and_then(|key| Credential::new(key).ok()))
    }

    async fn set(&self, credential: &Credential) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(credential.as_str().to_string()),
        );

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| TitanError::SerializationError(e.to_string()))?;
        tokio::fs::write(&self.path, body).await?;

        log::debug!("Credential written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nope.json"));
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");
        let store = FileCredentialStore::new(&path);

        store.set(&Credential::new("AIza-test").unwrap()).await.unwrap();
        assert_eq!(store.get().await.unwrap().unwrap().as_str(), "AIza-test");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"titan_api_key\""));
    }

    #[tokio::test]
    async fn test_other_keys_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, r#"{"theme": "dark", "titan_api_key": "old"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        store.set(&Credential::new("new").unwrap()).await.unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["titan_api_key"], "new");
    }

    #[tokio::test]
    async fn test_blank_stored_value_is_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, r#"{"titan_api_key": "   "}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_object_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.get().await,
            Err(TitanError::StorageError(_))
        ));
    }
}
