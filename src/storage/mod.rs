pub mod file;
pub mod memory;
pub mod traits;

use crate::{
    config::Config,
    error::{Result, TitanError},
};
use std::fmt;
use std::sync::Arc;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
pub use traits::{CredentialStore, CREDENTIAL_KEY};

/// Opaque API key. Never empty, never surrounded by whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let key = raw.as_ref().trim();
        if key.is_empty() {
            return Err(TitanError::EmptyCredential);
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        format!("{}…", visible)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// Opens the file-backed store configured for this machine.
pub fn open_store(config: &Config) -> Result<Arc<dyn CredentialStore>> {
    let path = config.credential_path().ok_or_else(|| {
        TitanError::ConfigError(
            "No config directory found; set TITAN_CREDENTIAL_PATH".into(),
        )
    })?;
    log::debug!("Using credential file {}", path.display());
    Ok(Arc::new(FileCredentialStore::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_is_trimmed() {
        let credential = Credential::new("  AIzaSyExample \n").unwrap();
        assert_eq!(credential.as_str(), "AIzaSyExample");
    }

    #[test]
    fn test_blank_credential_rejected() {
        assert!(matches!(Credential::new(""), Err(TitanError::EmptyCredential)));
        assert!(matches!(Credential::new("   "), Err(TitanError::EmptyCredential)));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let credential = Credential::new("AIzaSyVerySecret").unwrap();
        let printed = format!("{:?}", credential);
        assert!(printed.contains("AIza"));
        assert!(!printed.contains("VerySecret"));
    }

    #[test]
    fn test_open_store_uses_configured_path() {
        let config = Config::new().with_credential_path("/tmp/titan-test/creds.json");
        assert!(open_store(&config).is_ok());
    }
}
