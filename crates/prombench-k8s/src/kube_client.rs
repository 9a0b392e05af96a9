//! [`ClusterClient`] backed by the Kubernetes API via server-side apply.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::api::{Api, DynamicObject, Patch, PatchParams};
use kube::core::{GroupVersionKind, ObjectMeta};
use kube::discovery::{self, Scope};
use kube::{Client, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ClusterClient;
use crate::error::{ClusterError, ClusterResult};
use crate::manifest::ManifestFile;
use crate::resource::ResourceObject;

const DEFAULT_NAMESPACE: &str = "default";

/// Applies manifests to the cluster the ambient kubeconfig points at.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    field_manager: String,
}

impl KubeCluster {
    pub fn new(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }

    /// Connect using in-cluster config or the local kubeconfig.
    pub async fn try_default(field_manager: impl Into<String>) -> ClusterResult<Self> {
        let client = Client::try_default().await.map_err(ClusterError::Connect)?;
        Ok(Self::new(client, field_manager))
    }

    async fn apply_object(&self, file: &str, object: &ResourceObject) -> ClusterResult<()> {
        match object {
            ResourceObject::Deployment(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::StatefulSet(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::DaemonSet(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::Service(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::ConfigMap(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::Secret(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::ServiceAccount(o) => self.apply_namespaced(file, &**o).await,
            ResourceObject::Namespace(o) => self.apply_cluster_scoped(file, &**o).await,
            ResourceObject::Other(o) => self.apply_dynamic(file, object.kind(), o).await,
        }
    }

    async fn apply_namespaced<K>(&self, file: &str, object: &K) -> ClusterResult<()>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + Debug
            + Serialize
            + DeserializeOwned,
    {
        let kind = K::kind(&());
        let name = object_name(file, &kind, object.meta())?;
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace_of(object.meta()));
        self.server_side_apply(api, file, &kind, name, object).await
    }

    async fn apply_cluster_scoped<K>(&self, file: &str, object: &K) -> ClusterResult<()>
    where
        K: Resource<Scope = ClusterResourceScope, DynamicType = ()>
            + Clone
            + Debug
            + Serialize
            + DeserializeOwned,
    {
        let kind = K::kind(&());
        let name = object_name(file, &kind, object.meta())?;
        let api: Api<K> = Api::all(self.client.clone());
        self.server_side_apply(api, file, &kind, name, object).await
    }

    /// Kinds without a typed variant: resolve the resource through API
    /// discovery, then apply at the scope the server reports.
    async fn apply_dynamic(
        &self,
        file: &str,
        kind: &str,
        object: &DynamicObject,
    ) -> ClusterResult<()> {
        let name = object_name(file, kind, &object.metadata)?;
        let types = object.types.as_ref().ok_or_else(|| {
            ClusterError::Other(anyhow::anyhow!("{file}: {kind} has no apiVersion"))
        })?;
        let gvk = GroupVersionKind::try_from(types)
            .map_err(|e| ClusterError::Other(anyhow::anyhow!("{file}: {e}")))?;

        let (resource, capabilities) = discovery::pinned_kind(&self.client, &gvk)
            .await
            .map_err(|source| ClusterError::Discovery {
                file: file.to_string(),
                kind: kind.to_string(),
                source,
            })?;

        let api: Api<DynamicObject> = match capabilities.scope {
            Scope::Namespaced => Api::namespaced_with(
                self.client.clone(),
                namespace_of(&object.metadata),
                &resource,
            ),
            Scope::Cluster => Api::all_with(self.client.clone(), &resource),
        };
        self.server_side_apply(api, file, kind, name, object).await
    }

    async fn server_side_apply<K>(
        &self,
        api: Api<K>,
        file: &str,
        kind: &str,
        name: &str,
        object: &K,
    ) -> ClusterResult<()>
    where
        K: Clone + Debug + Serialize + DeserializeOwned,
    {
        let params = PatchParams::apply(&self.field_manager).force();
        api.patch(name, &params, &Patch::Apply(object))
            .await
            .map_err(|source| ClusterError::Apply {
                file: file.to_string(),
                kind: kind.to_string(),
                name: name.to_string(),
                source,
            })?;

        debug!(file, kind, name, "applied");
        Ok(())
    }
}

fn object_name<'a>(file: &str, kind: &str, meta: &'a ObjectMeta) -> ClusterResult<&'a str> {
    meta.name.as_deref().ok_or_else(|| ClusterError::Unnamed {
        file: file.to_string(),
        kind: kind.to_string(),
    })
}

fn namespace_of(meta: &ObjectMeta) -> &str {
    meta.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
}

#[async_trait]
impl ClusterClient for KubeCluster {
    async fn apply(&self, files: &[ManifestFile]) -> ClusterResult<()> {
        for file in files {
            for object in &file.objects {
                self.apply_object(&file.file_name, object).await?;
            }
        }
        Ok(())
    }
}
