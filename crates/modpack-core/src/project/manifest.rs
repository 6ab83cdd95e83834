//! Project description types and parsing

use crate::host::{Artifact, BuildHost, Resource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build locations of the project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    /// Build output directory (defaults to "target")
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Compiled classes directory (defaults to "<directory>/classes")
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Script source directories copied into the module
    #[serde(default)]
    pub script_source_roots: Vec<String>,
}

/// Module parameters stored alongside the project
///
/// Every field is optional; unset fields fall back to the host defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSection {
    /// Module (folder) name
    #[serde(default)]
    pub name: Option<String>,

    /// Main verticle, e.g. app.js or org.acme.MyApp
    #[serde(default)]
    pub main: Option<String>,

    #[serde(default)]
    pub worker: Option<bool>,

    #[serde(default, alias = "preserve-cwd")]
    pub preserve_cwd: Option<bool>,

    #[serde(default, alias = "auto-redeploy")]
    pub auto_redeploy: Option<bool>,

    /// Comma-separated list of modules whose resources this module includes
    #[serde(default)]
    pub includes: Option<String>,

    /// Also produce a zip of the assembled module
    #[serde(default)]
    pub zip: Option<bool>,
}

/// Project description written by the build host (modpack.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub group_id: String,

    pub artifact_id: String,

    pub version: String,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub resources: Vec<Resource>,

    #[serde(default)]
    pub dependencies: Vec<Artifact>,

    #[serde(default)]
    pub module: ModuleSection,

    /// Directory relative paths resolve against (the file's parent)
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ProjectManifest {
    /// Resolve a path from the project file against its directory
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn resolve_str(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        self.resolve(Path::new(path)).to_string_lossy().into_owned()
    }
}

impl BuildHost for ProjectManifest {
    fn build_directory(&self) -> PathBuf {
        let dir = self
            .build
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("target"));
        self.resolve(&dir)
    }

    fn classes_directory(&self) -> PathBuf {
        match &self.build.output_directory {
            Some(dir) => self.resolve(dir),
            None => self.build_directory().join("classes"),
        }
    }

    fn script_source_roots(&self) -> Vec<String> {
        self.build
            .script_source_roots
            .iter()
            .map(|root| self.resolve_str(root))
            .collect()
    }

    fn resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|resource| Resource {
                target_path: resource
                    .target_path
                    .as_deref()
                    .map(|path| self.resolve_str(path)),
            })
            .collect()
    }

    fn dependency_artifacts(&self) -> Vec<Artifact> {
        self.dependencies
            .iter()
            .map(|artifact| Artifact {
                file: artifact.file.as_deref().map(|f| self.resolve(f)),
                ..artifact.clone()
            })
            .collect()
    }

    fn group_id(&self) -> &str {
        &self.group_id
    }

    fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    fn version(&self) -> &str {
        &self.version
    }
}
