//! Project description loading
//!
//! The build host describes the project in a YAML file (`modpack.yaml`):
//! coordinates, build locations, resolved dependencies and module parameters.

pub mod manifest;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use manifest::{BuildSection, ModuleSection, ProjectManifest};

/// The project file name to search for
pub const PROJECT_FILE_NAME: &str = "modpack.yaml";

impl ProjectManifest {
    /// Parse a project description; relative paths resolve against `base_dir`
    pub fn parse(contents: &str, base_dir: &Path) -> Result<Self> {
        let mut project: ProjectManifest =
            serde_yaml::from_str(contents).context("Failed to parse project description")?;
        project.base_dir = base_dir.to_path_buf();
        Ok(project)
    }

    /// Load a project description file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::parse(&contents, &base_dir)
            .with_context(|| format!("Invalid project description {}", path.display()))
    }

    /// Find the project file in a directory
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(PROJECT_FILE_NAME);
        if path.is_file() {
            debug!("found project file at {}", path.display());
            Some(path)
        } else {
            debug!("no project file at {}", path.display());
            None
        }
    }
}
