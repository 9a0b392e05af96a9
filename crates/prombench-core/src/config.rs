//! scaler.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Field manager name used for server-side apply when none is configured.
pub const DEFAULT_FIELD_MANAGER: &str = "prombench-scaler";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalerConfig {
    pub scale: Option<ScaleSection>,
    pub manifests: Option<ManifestsSection>,
    pub cluster: Option<ClusterSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleSection {
    pub pattern: Option<String>,
    pub max: Option<i32>,
    pub min: Option<i32>,
    /// Go-style duration, e.g. "15m".
    pub interval: Option<String>,
    pub step_factor: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestsSection {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSection {
    pub field_manager: Option<String>,
}

impl ScalerConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn scale(&self) -> ScaleSection {
        self.scale.clone().unwrap_or_default()
    }

    pub fn manifests(&self) -> ManifestsSection {
        self.manifests.clone().unwrap_or_default()
    }

    pub fn field_manager(&self) -> &str {
        self.cluster
            .as_ref()
            .and_then(|c| c.field_manager.as_deref())
            .unwrap_or(DEFAULT_FIELD_MANAGER)
    }
}
