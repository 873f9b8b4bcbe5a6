pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod media;
pub mod models;
pub mod storage;
pub mod studio;

pub use config::{Config, GeminiConfig};
pub use error::{Result, TitanError};
pub use gemini::{GeminiClient, GenerationService, ImageClient};
pub use models::*;
pub use storage::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use studio::{ContentView, Session, Studio};
