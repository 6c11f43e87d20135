use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MediaConfig;

/// StorageError
///
/// `Rejected` is the client's fault (wrong file type, empty file) and maps to 400;
/// `Upload` is a media host failure and maps to 500.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Rejected(String),
    #[error("media upload failed: {0}")]
    Upload(String),
}

// 1. StorageService Contract
/// StorageService
///
/// The contract for the media host. Handlers only ever see this trait; production
/// wires in `S3StorageClient`, tests wire in `MockStorageService`.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Creates the configured bucket if missing. Used for the local MinIO setup only.
    async fn ensure_bucket_exists(&self);

    /// Stores an image under `<folder>/<uuid>.<ext>` and returns its public URL.
    ///
    /// # Arguments
    /// * `folder`: Logical grouping, e.g. "portfolio".
    /// * `filename`: The client-supplied name; only its extension is kept.
    /// * `content_type`: Must be an `image/*` MIME type.
    async fn upload_image(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Validates an upload and builds the object key it will be stored under.
pub fn object_key(
    folder: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<String, StorageError> {
    if !content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(StorageError::Rejected(
            "Only image files are allowed".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(StorageError::Rejected("No file uploaded".to_string()));
    }

    let folder = sanitize_key(folder);
    let ext = extension(filename, content_type);
    let name = format!("{}.{}", Uuid::new_v4(), ext);
    Ok(if folder.is_empty() {
        name
    } else {
        format!("{folder}/{name}")
    })
}

/// Picks a short alphanumeric extension from the filename, falling back to the MIME subtype.
fn extension(filename: &str, content_type: &str) -> String {
    let from_name = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = from_name {
        return ext;
    }

    let subtype = content_type
        .split_once('/')
        .map(|(_, sub)| sub.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
        .unwrap_or_default();
    match subtype.as_str() {
        "jpeg" | "pjpeg" => "jpg".to_string(),
        "svg+xml" => "svg".to_string(),
        s if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()) => s.to_string(),
        _ => "bin".to_string(),
    }
}

/// sanitize_key
///
/// Drops empty, `.` and `..` segments so a key can never climb out of its folder.
pub fn sanitize_key(key: &str) -> String {
    key.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

// 2. The Real Implementation (S3-compatible media host)
/// S3StorageClient
///
/// Talks to any S3-compatible host (MinIO locally, a hosted bucket in production).
/// Path-style addressing is forced for MinIO compatibility.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    bucket_name: String,
    public_url: String,
}

impl S3StorageClient {
    pub fn new(media: &MediaConfig) -> Self {
        let credentials = s3::config::Credentials::new(
            &media.access_key,
            &media.secret_key,
            None,
            None,
            "static",
        );

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(&media.endpoint)
            .region(s3::config::Region::new(media.region.clone()))
            .behavior_version_latest()
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(config),
            bucket_name: media.bucket.clone(),
            public_url: media.public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    async fn ensure_bucket_exists(&self) {
        if let Err(e) = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await
        {
            // Already-owned buckets also land here.
            tracing::debug!(error = %e, bucket = %self.bucket_name, "create_bucket skipped");
        }
    }

    async fn upload_image(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let key = object_key(folder, filename, content_type, &bytes)?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        tracing::info!(key = %key, "Image uploaded");
        Ok(format!("{}/{}", self.public_url, key))
    }
}

// 3. The Mock Implementation (For Tests)
/// MockStorageService
///
/// Runs the same validation as the real client and returns a deterministic URL
/// without any network access.
#[derive(Clone, Default)]
pub struct MockStorageService {
    /// When true, every valid upload fails as if the media host were down.
    pub should_fail: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {}

    async fn upload_image(
        &self,
        folder: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let key = object_key(folder, filename, content_type, &bytes)?;
        if self.should_fail {
            return Err(StorageError::Upload(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        Ok(format!("http://localhost:9000/mock-bucket/{key}"))
    }
}

/// StorageState
///
/// The concrete type used to share the storage service across the application state.
pub type StorageState = Arc<dyn StorageService>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_key("../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_key("team/./..//x"), "team/x");
        assert_eq!(sanitize_key("..\\..\\win"), "win");
    }

    #[test]
    fn key_uses_folder_uuid_and_extension() {
        let key = object_key("portfolio", "Shot.PNG", "image/png", b"data").unwrap();
        let (folder, name) = key.split_once('/').unwrap();
        assert_eq!(folder, "portfolio");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
        assert_eq!(ext, "png");
    }

    #[test]
    fn extension_falls_back_to_mime_subtype() {
        assert_eq!(extension("photo", "image/jpeg"), "jpg");
        assert_eq!(extension("logo.", "image/svg+xml"), "svg");
        assert_eq!(extension("x.tar.gz../..", "image/webp"), "webp");
    }

    #[test]
    fn non_images_are_rejected() {
        let err = object_key("team", "cv.pdf", "application/pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));
    }

    #[test]
    fn empty_files_are_rejected() {
        assert!(matches!(
            object_key("team", "a.png", "image/png", b""),
            Err(StorageError::Rejected(_))
        ));
    }
}
