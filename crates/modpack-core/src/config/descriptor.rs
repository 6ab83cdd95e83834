//! Module descriptor (mod.json) generation

use super::settings::ModuleSettings;
use crate::error::{AssembleError, AssembleResult};
use crate::MOD_JSON;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Contents of `mod.json`
///
/// Only parameters that are set end up in the file: strings when non-empty,
/// flags when true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub worker: bool,

    #[serde(rename = "preserve-cwd", skip_serializing_if = "is_false")]
    pub preserve_cwd: bool,

    #[serde(rename = "auto-redeploy", skip_serializing_if = "is_false")]
    pub auto_redeploy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,
}

impl ModDescriptor {
    pub fn from_settings(settings: &ModuleSettings) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let descriptor = Self {
            main: non_empty(&settings.main),
            worker: settings.worker,
            preserve_cwd: settings.preserve_cwd,
            auto_redeploy: settings.auto_redeploy,
            includes: non_empty(&settings.includes),
        };

        for (key, value) in descriptor.params() {
            info!("Config param [{}]:[{}]", key, value);
        }

        descriptor
    }

    /// The key/value pairs that will be written, in file order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(main) = &self.main {
            params.push(("main", main.clone()));
        }
        if self.worker {
            params.push(("worker", "true".to_string()));
        }
        if self.preserve_cwd {
            params.push(("preserve-cwd", "true".to_string()));
        }
        if self.auto_redeploy {
            params.push(("auto-redeploy", "true".to_string()));
        }
        if let Some(includes) = &self.includes {
            params.push(("includes", includes.clone()));
        }
        params
    }

    /// Compact JSON text of the descriptor
    pub fn to_json(&self) -> AssembleResult<String> {
        serde_json::to_string(self).map_err(AssembleError::SerializeDescriptor)
    }

    /// Write `mod.json` into the module folder, replacing any existing file
    pub async fn write_to(&self, module_dir: &Path) -> AssembleResult<PathBuf> {
        let path = module_dir.join(MOD_JSON);
        let json = self.to_json()?;

        fs::write(&path, json.as_bytes())
            .await
            .map_err(|source| AssembleError::WriteDescriptor {
                path: path.clone(),
                source,
            })?;

        let shown = fs::canonicalize(&path).await.unwrap_or_else(|_| path.clone());
        info!("Configuration written to: [{}]", shown.display());

        Ok(path)
    }
}
