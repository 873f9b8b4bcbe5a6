use thiserror::Error;

#[derive(Debug, Error)]
pub enum TitanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Masukkan API key kamu dulu sebelum generate gambar.")]
    MissingCredential,
    #[error("Masukkan API key dulu!")]
    EmptyCredential,
    #[error("Harap masukkan prompt deskripsi gambar.")]
    EmptyPrompt,
    #[error("A generation request is already in flight")]
    Busy,
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("API tidak mengembalikan gambar. Coba prompt yang berbeda.")]
    NoImage,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl TitanError {
    /// Errors caught before any network call; rendered without logging.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TitanError::MissingCredential | TitanError::EmptyPrompt | TitanError::EmptyCredential
        )
    }
}

pub type Result<T> = std::result::Result<T, TitanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image_message() {
        assert!(TitanError::NoImage
            .to_string()
            .contains("tidak mengembalikan gambar"));
    }

    #[test]
    fn test_precondition_classification() {
        assert!(TitanError::MissingCredential.is_precondition());
        assert!(TitanError::EmptyPrompt.is_precondition());
        assert!(!TitanError::NoImage.is_precondition());
        assert!(!TitanError::Service {
            status: 403,
            message: "denied".into()
        }
        .is_precondition());
    }
}
