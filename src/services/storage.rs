//! Image storage adapter.
//!
//! Design images go to Supabase object storage when it is configured and
//! reachable, otherwise to the local media directory served under `/media/`.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::supabase::{SupabaseConfig, SupabaseStorageClient, is_remote_url};
use crate::config::StorageConfig;
use crate::constants::{DEFAULT_IMAGE_EXTENSION, IMAGE_EXTENSIONS, media};

/// An uploaded image file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    const PNG_MAGIC: &'static [u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG_MAGIC: &'static [u8] = &[0xFF, 0xD8, 0xFF];

    /// Identifies the image format from its leading bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(Self::PNG_MAGIC) {
            Some(Self::Png)
        } else if bytes.starts_with(Self::JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl ImageUpload {
    /// Lower-cased extension of the original filename with its dot, `.png` when
    /// missing or not an image extension.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            .map_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string(), |e| format!(".{e}"))
    }

    #[must_use]
    pub fn mime(&self) -> String {
        if let Some(kind) = ImageKind::sniff(&self.bytes) {
            return kind.mime().to_string();
        }
        self.content_type
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&self.filename)
                    .first_or(mime_guess::mime::IMAGE_PNG)
                    .to_string()
            })
    }
}

/// Object key for a new upload: `<owner>/<uuid><ext>`.
#[must_use]
pub fn object_key(upload: &ImageUpload, owner_id: Uuid) -> String {
    format!("{owner_id}/{}{}", Uuid::new_v4(), upload.extension())
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Stores the image and returns the URL recorded on the design.
    async fn upload(&self, upload: &ImageUpload, owner_id: Uuid) -> Result<String>;

    /// Removes the image behind `url`. `Ok(false)` means nothing was removed.
    async fn delete(&self, url: &str) -> Result<bool>;
}

pub struct LocalStorage {
    media_root: PathBuf,
}

impl LocalStorage {
    #[must_use]
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    pub async fn put(&self, key: &str, upload: &ImageUpload) -> Result<String> {
        let relative = format!("{}/{key}", media::DESIGNS_DIR);
        let path = self.resolve(&relative)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&path, &upload.bytes)
            .await
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        let url = format!("{}{relative}", media::URL_PREFIX);
        info!(path = %path.display(), url = %url, "Saved image locally");
        Ok(url)
    }

    /// Maps a path relative to the media root onto disk, refusing anything that
    /// could leave the root.
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Refusing media path outside the media root: {}", relative.display());
        }
        Ok(self.media_root.join(relative))
    }
}

#[async_trait]
impl ImageStorage for LocalStorage {
    async fn upload(&self, upload: &ImageUpload, owner_id: Uuid) -> Result<String> {
        self.put(&object_key(upload, owner_id), upload).await
    }

    async fn delete(&self, url: &str) -> Result<bool> {
        let Some(relative) = url.strip_prefix(media::URL_PREFIX) else {
            return Ok(false);
        };
        let relative = relative.split('?').next().unwrap_or(relative);
        let path = self.resolve(relative)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Deleted local image");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

pub struct SupabaseStorage {
    client: SupabaseStorageClient,
}

impl SupabaseStorage {
    #[must_use]
    pub const fn new(client: SupabaseStorageClient) -> Self {
        Self { client }
    }

    pub async fn put(&self, key: &str, upload: &ImageUpload) -> Result<String> {
        self.client
            .upload(key, upload.bytes.clone(), &upload.mime())
            .await?;
        Ok(self.client.public_url(key))
    }
}

#[async_trait]
impl ImageStorage for SupabaseStorage {
    async fn upload(&self, upload: &ImageUpload, owner_id: Uuid) -> Result<String> {
        self.put(&object_key(upload, owner_id), upload).await
    }

    async fn delete(&self, url: &str) -> Result<bool> {
        let Some(path) = self.client.object_path_from_url(url) else {
            warn!(url, "Could not extract object path from URL");
            return Ok(false);
        };

        info!(bucket = self.client.bucket(), path = %path, "Deleting object from Supabase");
        self.client.remove(&[path.as_str()]).await?;
        Ok(true)
    }
}

/// Remote storage with local fallback.
pub struct StorageService {
    remote: Option<SupabaseStorage>,
    local: LocalStorage,
}

impl StorageService {
    #[must_use]
    pub const fn new(remote: Option<SupabaseStorage>, local: LocalStorage) -> Self {
        Self { remote, local }
    }

    /// Builds the adapter from config. Remote storage is enabled only when both
    /// URL and key are set.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let remote = if config.remote_configured() {
            let client = SupabaseStorageClient::new(SupabaseConfig::from_storage(config))?;
            Some(SupabaseStorage::new(client))
        } else {
            info!("Supabase not configured, images will be stored locally");
            None
        };

        Ok(Self::new(remote, LocalStorage::new(&config.media_root)))
    }

    #[must_use]
    pub fn into_shared(self) -> Arc<dyn ImageStorage> {
        Arc::new(self)
    }
}

#[async_trait]
impl ImageStorage for StorageService {
    async fn upload(&self, upload: &ImageUpload, owner_id: Uuid) -> Result<String> {
        let key = object_key(upload, owner_id);

        if let Some(remote) = &self.remote {
            match remote.put(&key, upload).await {
                Ok(url) => {
                    metrics::counter!("picu_image_uploads_total", "backend" => "remote")
                        .increment(1);
                    return Ok(url);
                }
                Err(e) => {
                    warn!(error = %e, key = %key, "Remote upload failed, falling back to local storage");
                }
            }
        }

        let url = self.local.put(&key, upload).await?;
        metrics::counter!("picu_image_uploads_total", "backend" => "local").increment(1);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<bool> {
        if url.trim().is_empty() {
            return Ok(false);
        }

        if is_remote_url(url) {
            return match &self.remote {
                Some(remote) => remote.delete(url).await,
                None => {
                    warn!(url, "Remote storage not configured, leaving object in place");
                    Ok(false)
                }
            };
        }

        if url.starts_with(media::URL_PREFIX) {
            return self.local.delete(url).await;
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn upload(filename: &str) -> ImageUpload {
        ImageUpload {
            filename: filename.to_string(),
            content_type: None,
            bytes: PNG_BYTES.to_vec(),
        }
    }

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("picu-storage-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_sniff() {
        assert_eq!(ImageKind::sniff(PNG_BYTES), Some(ImageKind::Png));
        assert_eq!(
            ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0]),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(ImageKind::sniff(b"GIF89a"), None);
        assert_eq!(ImageKind::sniff(&[]), None);
    }

    #[test]
    fn test_extension() {
        assert_eq!(upload("Logo.PNG").extension(), ".png");
        assert_eq!(upload("photo.jpeg").extension(), ".jpeg");
        assert_eq!(upload("noext").extension(), ".png");
        assert_eq!(upload("weird.exe").extension(), ".png");
    }

    #[test]
    fn test_mime_prefers_content() {
        let mut up = upload("x.jpg");
        up.content_type = Some("image/jpeg".to_string());
        assert_eq!(up.mime(), "image/png");
    }

    #[test]
    fn test_object_key_shape() {
        let owner = Uuid::new_v4();
        let key = object_key(&upload("a.jpg"), owner);
        let (prefix, file) = key.split_once('/').unwrap();
        assert_eq!(prefix, owner.to_string());
        assert!(file.ends_with(".jpg"));
        assert_eq!(file.len(), 36 + 4);
    }

    #[tokio::test]
    async fn test_local_upload_and_delete() {
        let root = temp_root();
        let storage = LocalStorage::new(&root);
        let owner = Uuid::new_v4();

        let url = storage.upload(&upload("a.png"), owner).await.unwrap();
        assert!(url.starts_with(&format!("/media/designs/{owner}/")));

        let on_disk = root.join(url.trim_start_matches("/media/"));
        assert_eq!(std::fs::read(&on_disk).unwrap(), PNG_BYTES);

        assert!(storage.delete(&url).await.unwrap());
        assert!(!on_disk.exists());
        assert!(!storage.delete(&url).await.unwrap());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_local_delete_rejects_traversal() {
        let storage = LocalStorage::new(temp_root());
        assert!(storage.delete("/media/../secret.txt").await.is_err());
        assert!(storage.delete("/media//etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_service_without_remote_uses_local() {
        let root = temp_root();
        let service = StorageService::new(None, LocalStorage::new(&root));

        let url = service.upload(&upload("b.jpg"), Uuid::new_v4()).await.unwrap();
        assert!(url.starts_with("/media/designs/"));
        assert!(url.ends_with(".jpg"));

        assert!(service.delete(&url).await.unwrap());
        assert!(
            !service
                .delete("https://abc.supabase.co/storage/v1/object/public/designs/x.png")
                .await
                .unwrap()
        );
        assert!(!service.delete("https://elsewhere.example/img.png").await.unwrap());
        assert!(!service.delete("").await.unwrap());

        let _ = std::fs::remove_dir_all(root);
    }
}
