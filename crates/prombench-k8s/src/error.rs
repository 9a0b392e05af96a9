//! Error types for manifest loading and cluster access.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for manifest loading.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Result type alias for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors raised while turning manifest files into a target set.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest path does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{file}: undefined template variable {name}")]
    UndefinedVar { file: String, name: String },

    #[error("{file}: invalid yaml: {source}")]
    Yaml {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{file}: document has no kind")]
    MissingKind { file: String },

    #[error("{file}: {kind} has no apiVersion")]
    MissingApiVersion { file: String, kind: String },

    #[error("{file}: failed to decode {kind}: {source}")]
    Decode {
        file: String,
        kind: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while talking to the cluster.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("failed to create kubernetes client: {0}")]
    Connect(#[source] kube::Error),

    #[error("{file}: {kind} has no metadata.name")]
    Unnamed { file: String, kind: String },

    #[error("{file}: failed to discover {kind}: {source}")]
    Discovery {
        file: String,
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("{file}: failed to apply {kind} {name}: {source}")]
    Apply {
        file: String,
        kind: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("cluster error: {0}")]
    Other(#[from] anyhow::Error),
}
