use crate::{
    error::{Result, TitanError},
    models::ReferenceImage,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

pub const DEFAULT_DOWNLOAD_NAME: &str = "titan-ai-generated-image.png";

pub fn mime_from_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Reads a reference photo and encodes it for the edit request.
pub async fn encode_reference_image(path: impl AsRef<Path>) -> Result<ReferenceImage> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime_type = mime_from_path(path);
    log::debug!(
        "Encoded reference image {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime_type
    );
    Ok(ReferenceImage::from_bytes(&bytes, mime_type))
}

/// Splits `data:<mime>;base64,<payload>` into mime type and decoded bytes.
pub fn parse_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| TitanError::ResponseError("not a data URI".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| TitanError::ResponseError("data URI has no payload".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| TitanError::ResponseError("data URI is not base64".into()))?;

    let bytes = BASE64
        .decode(payload.as_bytes())
        .map_err(|e| TitanError::ResponseError(format!("invalid base64 image: {}", e)))?;
    Ok((mime_type.to_string(), bytes))
}

pub async fn save_data_uri(uri: &str, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let (_, bytes) = parse_data_uri(uri)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    log::info!("💾 Image saved to: {}", path.display());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_path(Path::new("a/photo.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("shot.webp")), "image/webp");
        assert_eq!(mime_from_path(Path::new("anim.gif")), "image/gif");
        assert_eq!(mime_from_path(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_encode_reference_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.png");
        std::fs::write(&path, [0u8, 0, 0]).unwrap();

        let image = encode_reference_image(&path).await.unwrap();
        assert_eq!(image.data, "AAAA");
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_encode_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_reference_image(dir.path().join("gone.png")).await;
        assert!(matches!(result, Err(TitanError::IoError(_))));
    }

    #[test]
    fn test_parse_data_uri() {
        let (mime, bytes) = parse_data_uri("data:image/png;base64,AAAA").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0, 0, 0]);

        assert!(parse_data_uri("https://example.test/a.png").is_err());
        assert!(parse_data_uri("data:image/png,AAAA").is_err());
        assert!(parse_data_uri("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn test_save_data_uri_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(DEFAULT_DOWNLOAD_NAME);

        let written = save_data_uri("data:image/png;base64,AAAA", &path)
            .await
            .unwrap();
        assert_eq!(written, 3);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0, 0, 0]);
    }
}
