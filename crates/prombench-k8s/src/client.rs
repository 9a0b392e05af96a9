//! The seam between the scaler and a cluster.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ClusterResult;
use crate::manifest::ManifestFile;

/// Something that can create or update manifest objects in a cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Apply every object in `files`, in order.
    async fn apply(&self, files: &[ManifestFile]) -> ClusterResult<()>;
}

#[async_trait]
impl<T: ClusterClient + ?Sized> ClusterClient for Arc<T> {
    async fn apply(&self, files: &[ManifestFile]) -> ClusterResult<()> {
        (**self).apply(files).await
    }
}
