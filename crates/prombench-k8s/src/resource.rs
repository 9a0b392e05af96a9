//! Typed Kubernetes objects found in benchmark manifests.

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret, Service, ServiceAccount};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::{ManifestError, ManifestResult};

/// One object from a manifest document, decoded according to its `kind`.
///
/// Kinds without a typed variant are kept as [`DynamicObject`]s. The scaler
/// never rewrites them, but they still load.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceObject {
    Deployment(Box<Deployment>),
    StatefulSet(Box<StatefulSet>),
    DaemonSet(Box<DaemonSet>),
    Service(Box<Service>),
    ConfigMap(Box<ConfigMap>),
    Secret(Box<Secret>),
    ServiceAccount(Box<ServiceAccount>),
    Namespace(Box<Namespace>),
    Other(Box<DynamicObject>),
}

impl ResourceObject {
    /// Decode a single YAML document. `file` is only used for error context.
    pub fn from_value(file: &str, value: Value) -> ManifestResult<Self> {
        let kind = match value.get("kind").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => {
                return Err(ManifestError::MissingKind {
                    file: file.to_string(),
                });
            }
        };

        let object = match kind.as_str() {
            "Deployment" => Self::Deployment(decode(file, &kind, value)?),
            "StatefulSet" => Self::StatefulSet(decode(file, &kind, value)?),
            "DaemonSet" => Self::DaemonSet(decode(file, &kind, value)?),
            "Service" => Self::Service(decode(file, &kind, value)?),
            "ConfigMap" => Self::ConfigMap(decode(file, &kind, value)?),
            "Secret" => Self::Secret(decode(file, &kind, value)?),
            "ServiceAccount" => Self::ServiceAccount(decode(file, &kind, value)?),
            "Namespace" => Self::Namespace(decode(file, &kind, value)?),
            _ => {
                let object: Box<DynamicObject> = decode(file, &kind, value)?;
                if object.types.is_none() {
                    return Err(ManifestError::MissingApiVersion {
                        file: file.to_string(),
                        kind,
                    });
                }
                Self::Other(object)
            }
        };
        Ok(object)
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(_) => "Deployment",
            Self::StatefulSet(_) => "StatefulSet",
            Self::DaemonSet(_) => "DaemonSet",
            Self::Service(_) => "Service",
            Self::ConfigMap(_) => "ConfigMap",
            Self::Secret(_) => "Secret",
            Self::ServiceAccount(_) => "ServiceAccount",
            Self::Namespace(_) => "Namespace",
            Self::Other(o) => o.types.as_ref().map_or("", |t| t.kind.as_str()),
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::Deployment(o) => &o.metadata,
            Self::StatefulSet(o) => &o.metadata,
            Self::DaemonSet(o) => &o.metadata,
            Self::Service(o) => &o.metadata,
            Self::ConfigMap(o) => &o.metadata,
            Self::Secret(o) => &o.metadata,
            Self::ServiceAccount(o) => &o.metadata,
            Self::Namespace(o) => &o.metadata,
            Self::Other(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata().name.as_deref()
    }

    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            Self::Deployment(d) => Some(d),
            _ => None,
        }
    }

    /// Copy of this object with `spec.replicas` set, or `None` if the object
    /// is not a deployment.
    pub fn with_replicas(&self, replicas: i32) -> Option<Self> {
        let mut deployment = self.as_deployment()?.clone();
        deployment.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
        Some(Self::Deployment(Box::new(deployment)))
    }

    /// Replica count of a deployment, if set.
    pub fn replicas(&self) -> Option<i32> {
        self.as_deployment()?.spec.as_ref()?.replicas
    }
}

fn decode<T: DeserializeOwned>(file: &str, kind: &str, value: Value) -> ManifestResult<Box<T>> {
    serde_yaml::from_value(value)
        .map(Box::new)
        .map_err(|source| ManifestError::Decode {
            file: file.to_string(),
            kind: kind.to_string(),
            source,
        })
}
