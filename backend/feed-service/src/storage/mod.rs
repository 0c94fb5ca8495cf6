/// Image blob storage
///
/// Owns the lifecycle of uploaded image blobs: content-type gating before
/// bytes hit durable storage, adoption of a fresh upload by an in-flight
/// create/update, and best-effort release once a post stops referencing a
/// blob. Release is detached from the calling operation so blob-store
/// slowness never shows up in user-facing latency.
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub mod images;

pub use images::DiskImageStore;

/// A stored image blob, as handed to the core by the upload layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub original_name: String,
    pub content_type: String,
    /// Opaque blob reference; becomes the post's `image_path`
    pub path: String,
}

/// Capability set for image blob storage
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Reject uploads outside the configured allow-list, before any bytes
    /// are persisted
    fn check_content_type(&self, content_type: &str) -> Result<()>;

    /// Persist an upload and return its blob reference
    async fn save(&self, original_name: &str, content_type: &str, data: &[u8])
        -> Result<StoredImage>;

    /// Read back the bytes of a stored blob; `NotFound` if it was released
    async fn load(&self, path: &str) -> Result<Vec<u8>>;

    /// Delete the underlying storage for a blob reference
    async fn release(&self, path: &str) -> Result<()>;
}

/// Release a blob on a detached task
///
/// Called only after the post mutation that dropped the reference has
/// committed. Failure leaves a transient orphan blob and is logged, never
/// escalated: the authoritative post state has already moved on.
pub fn spawn_release(store: Arc<dyn ImageStore>, path: String) {
    tokio::spawn(async move {
        if let Err(err) = store.release(&path).await {
            tracing::warn!(%path, "image release failed: {}", err);
        }
    });
}
