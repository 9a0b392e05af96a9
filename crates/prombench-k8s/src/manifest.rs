//! Target sets: the manifest files the scaler manages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ManifestError, ManifestResult};
use crate::resource::ResourceObject;
use crate::template;

/// One manifest file and the objects decoded from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestFile {
    pub file_name: String,
    pub objects: Vec<ResourceObject>,
}

impl ManifestFile {
    /// Decode a manifest from text, substituting `vars` first.
    pub fn parse(
        file_name: &str,
        content: &str,
        vars: &BTreeMap<String, String>,
    ) -> ManifestResult<Self> {
        let rendered = template::substitute(file_name, content, vars)?;

        let mut objects = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&rendered) {
            let value = Value::deserialize(document).map_err(|source| ManifestError::Yaml {
                file: file_name.to_string(),
                source,
            })?;
            if value.is_null() {
                continue;
            }
            objects.push(ResourceObject::from_value(file_name, value)?);
        }

        Ok(Self {
            file_name: file_name.to_string(),
            objects,
        })
    }

    pub fn deployments(&self) -> impl Iterator<Item = &ResourceObject> {
        self.objects.iter().filter(|o| o.as_deployment().is_some())
    }
}

/// An ordered, immutable collection of manifest files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSet {
    files: Vec<ManifestFile>,
}

impl TargetSet {
    pub fn new(files: Vec<ManifestFile>) -> Self {
        Self { files }
    }

    /// Load every manifest under `paths`.
    ///
    /// Files are taken as given; directories are walked recursively and
    /// contribute their `.yaml`/`.yml` files in file-name order.
    pub fn load(paths: &[PathBuf], vars: &BTreeMap<String, String>) -> ManifestResult<Self> {
        let mut files = Vec::new();
        for path in paths {
            for file in manifest_paths(path)? {
                let file_name = file.display().to_string();
                let content = std::fs::read_to_string(&file).map_err(|source| {
                    ManifestError::Read {
                        file: file_name.clone(),
                        source,
                    }
                })?;
                let manifest = ManifestFile::parse(&file_name, &content, vars)?;
                debug!(file = %file_name, objects = manifest.objects.len(), "loaded manifest");
                files.push(manifest);
            }
        }
        Ok(Self { files })
    }

    pub fn files(&self) -> &[ManifestFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of deployment objects across all files.
    pub fn deployment_count(&self) -> usize {
        self.files.iter().map(|f| f.deployments().count()).sum()
    }
}

fn manifest_paths(path: &Path) -> ManifestResult<Vec<PathBuf>> {
    if !path.exists() {
        return Err(ManifestError::MissingPath(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|source| ManifestError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_yaml(entry.path()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
