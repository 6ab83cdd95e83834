//! Dependency packaging into the module's lib folder

use crate::error::{AssembleError, AssembleResult};
use crate::host::Artifact;
use crate::MOD_LIB;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Outcome of copying dependencies
#[derive(Debug, Clone, Default)]
pub struct DependencyCopy {
    /// Files written into the lib folder
    pub copied: Vec<PathBuf>,

    /// Artifacts left out (no file, or a scope the module does not need)
    pub skipped: Vec<Artifact>,
}

/// Copy every compile/runtime dependency file into `<module_dir>/lib`
///
/// The lib folder is only created when there is at least one artifact.
pub async fn copy_dependencies(
    artifacts: &[Artifact],
    module_dir: &Path,
    module_name: &str,
) -> AssembleResult<DependencyCopy> {
    let mut result = DependencyCopy::default();

    if artifacts.is_empty() {
        return Ok(result);
    }

    let lib_dir = module_dir.join(MOD_LIB);
    if !fs::try_exists(&lib_dir).await.unwrap_or(false) {
        fs::create_dir_all(&lib_dir)
            .await
            .map_err(|source| AssembleError::CreateLibDir {
                path: lib_dir.clone(),
                source,
            })?;
    }

    for artifact in artifacts {
        let (Some(file), Some(scope)) = (artifact.file.as_ref(), artifact.scope()) else {
            debug!(
                "Skipping dependency {}:{}:{} (unresolved or no scope)",
                artifact.group_id, artifact.artifact_id, artifact.version
            );
            result.skipped.push(artifact.clone());
            continue;
        };

        if !scope.is_packaged() {
            debug!(
                "Skipping dependency {}:{}:{} with scope {}",
                artifact.group_id, artifact.artifact_id, artifact.version, scope
            );
            result.skipped.push(artifact.clone());
            continue;
        }

        let copy_error = |source| AssembleError::CopyDependency {
            file: file.clone(),
            dest: lib_dir.clone(),
            source,
        };

        let file_name = file.file_name().ok_or_else(|| {
            copy_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "dependency path has no file name",
            ))
        })?;

        info!(
            "Copying dependency: [{}][{}] -> [/{}/{}]",
            file_name.to_string_lossy(),
            scope,
            module_name,
            MOD_LIB
        );

        let target_path = lib_dir.join(file_name);
        fs::copy(file, &target_path).await.map_err(copy_error)?;
        result.copied.push(target_path);
    }

    Ok(result)
}
