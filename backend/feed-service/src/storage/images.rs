/// Local-disk image store
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::storage::{ImageStore, StoredImage};

const ALLOWED_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a stored blob reference to a file under the root directory.
    /// Only the file name component is honored, so a reference can never
    /// escape the image directory.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let file_name = Path::new(path)
            .file_name()
            .ok_or_else(|| AppError::Storage(format!("invalid image reference: {}", path)))?;
        Ok(self.root.join(file_name))
    }
}

/// Strip anything outside [A-Za-z0-9._-] from a client-supplied file name
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    fn check_content_type(&self, content_type: &str) -> Result<()> {
        let mime: mime::Mime = content_type
            .parse()
            .map_err(|_| AppError::InvalidImageType(content_type.to_string()))?;

        let essence = mime.essence_str();
        if ALLOWED_TYPES.contains(&essence) {
            Ok(())
        } else {
            Err(AppError::InvalidImageType(essence.to_string()))
        }
    }

    async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredImage> {
        // Gate on the declared type before any bytes reach disk.
        self.check_content_type(content_type)?;

        tokio::fs::create_dir_all(&self.root).await?;

        let file_name = format!(
            "{}-{}-{}",
            Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ"),
            Uuid::new_v4(),
            sanitize_name(original_name)
        );
        let full_path = self.root.join(&file_name);
        tokio::fs::write(&full_path, data).await?;

        Ok(StoredImage {
            original_name: original_name.to_string(),
            content_type: content_type.to_string(),
            path: full_path.to_string_lossy().into_owned(),
        })
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("image {} not found", path)))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn release(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path)?;
        tokio::fs::remove_file(&full_path).await?;
        tracing::debug!(path, "released image blob");
        Ok(())
    }
}
