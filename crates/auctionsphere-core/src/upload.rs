//! Reading a user-selected file into a `data:` URL

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_MIME: &str = "application/octet-stream";

/// A file picked by the user
#[async_trait]
pub trait FileSource: Send + Sync {
    /// File name as shown to the user
    fn name(&self) -> &str;
    /// Declared MIME type, if known
    fn mime_type(&self) -> Option<&str>;
    /// Read the whole file
    async fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// A file on the local disk
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    mime: Option<&'static str>,
}

impl LocalFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension);
        Self { path, name, mime }
    }
}

#[async_trait]
impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// MIME type for the extensions product photos and documents commonly use
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        "json" => Some("application/json"),
        _ => None,
    }
}

/// Read `file` completely and encode it as `data:<mime>;base64,<payload>`.
///
/// Read errors are returned as-is.
pub async fn file_to_base64(file: &dyn FileSource) -> io::Result<String> {
    let bytes = file.read_all().await?;
    let mime = file.mime_type().unwrap_or(DEFAULT_MIME);
    log::debug!("Encoded {} ({} bytes) as {}", file.name(), bytes.len(), mime);
    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    ))
}
