use anyhow::{Context, Result, bail};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const OBJECT_PATH: &str = "/storage/v1/object";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub timeout: Duration,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            bucket: "designs".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SupabaseConfig {
    #[must_use]
    pub fn from_storage(storage: &crate::config::StorageConfig) -> Self {
        Self {
            base_url: storage.supabase_url.trim_end_matches('/').to_string(),
            api_key: storage.supabase_key.clone(),
            bucket: storage.bucket.clone(),
            timeout: Duration::from_secs(storage.request_timeout_seconds),
        }
    }
}

/// Thin client for the Supabase Storage object REST API.
pub struct SupabaseStorageClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStorageClient {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("PICU/1.0")
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    fn object_url(&self, suffix: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .with_context(|| format!("Invalid Supabase URL: {}", self.config.base_url))?;
        url.set_path(&format!("{OBJECT_PATH}/{}{suffix}", self.config.bucket));
        Ok(url)
    }

    /// Uploads `bytes` to `path` inside the bucket, overwriting any existing object.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = self.object_url(&format!("/{path}"))?;

        info!(
            bucket = %self.config.bucket,
            path,
            size = bytes.len(),
            "Uploading object to Supabase"
        );

        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .context("Failed to connect to Supabase storage")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Supabase upload failed: status={status}, body={body}");
        }

        debug!(path, "Supabase upload accepted");
        Ok(())
    }

    pub async fn remove(&self, paths: &[&str]) -> Result<()> {
        let url = self.object_url("")?;

        let response = self
            .client
            .delete(url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .context("Failed to connect to Supabase storage")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Supabase delete failed: status={status}, body={body}");
        }

        Ok(())
    }

    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}{OBJECT_PATH}/public/{}/{path}",
            self.config.base_url, self.config.bucket
        )
    }

    /// Recovers the in-bucket object path from a stored public URL.
    #[must_use]
    pub fn object_path_from_url(&self, url: &str) -> Option<String> {
        object_path_from_url(url, &self.config.bucket)
    }
}

/// Takes the text after the public-object marker, or after `/<bucket>/` when the
/// marker is absent, and drops any query string.
#[must_use]
pub fn object_path_from_url(url: &str, bucket: &str) -> Option<String> {
    let storage_marker = format!("{OBJECT_PATH}/public/{bucket}/");
    let bucket_marker = format!("/{bucket}/");

    let tail = url
        .rsplit_once(&storage_marker)
        .or_else(|| url.rsplit_once(&bucket_marker))
        .map(|(_, tail)| tail)?;

    let path = tail.split('?').next().unwrap_or(tail);
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// True when a stored image URL points at remote object storage.
#[must_use]
pub fn is_remote_url(url: &str) -> bool {
    url.contains("supabase") || url.contains("/storage/")
}
