//! prombench-k8s — the Kubernetes side of the Prombench scaler.
//!
//! # Architecture
//!
//! Manifests are read once into a [`TargetSet`]: each file is passed through
//! `{{ .var }}` substitution, split into YAML documents, and every document
//! is decoded into a [`ResourceObject`] keyed on its `kind`. Workload and
//! core kinds get typed variants, so the rest of the workspace matches on
//! variants rather than comparing kind strings. Any other kind is carried
//! as a dynamic object.
//!
//! The cluster is reached through the [`ClusterClient`] trait. [`KubeCluster`]
//! implements it with server-side apply; tests substitute their own client.

pub mod client;
pub mod error;
pub mod kube_client;
pub mod manifest;
pub mod resource;
pub mod template;

pub use client::ClusterClient;
pub use error::{ClusterError, ClusterResult, ManifestError, ManifestResult};
pub use kube_client::KubeCluster;
pub use manifest::{ManifestFile, TargetSet};
pub use resource::ResourceObject;
