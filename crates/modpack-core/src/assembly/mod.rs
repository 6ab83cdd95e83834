//! Module assembly
//!
//! This module provides:
//! - Recursive tree copying of classes and script roots
//! - Dependency filtering and copying into `lib/`
//! - Optional zipping of the assembled module
//! - The `Assembler` that runs these steps in order

pub mod archive;
pub mod copier;
pub mod dependencies;

use crate::config::{ModDescriptor, ModuleSettings};
use crate::error::{AssembleError, AssembleResult};
use crate::host::{Artifact, BuildHost, Resource};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub use archive::zip_module;
pub use copier::copy_tree;
pub use dependencies::{copy_dependencies, DependencyCopy};

/// What an assembly produced
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    /// The module folder
    pub module_dir: PathBuf,

    /// Path of the written mod.json
    pub descriptor_path: PathBuf,

    /// The descriptor that was written
    pub descriptor: ModDescriptor,

    /// Files copied from script roots and the classes directory
    pub copied_files: Vec<PathBuf>,

    /// Resource files copied into the module root
    pub resources: Vec<PathBuf>,

    /// Dependency files copied into lib/
    pub dependencies: Vec<PathBuf>,

    /// Dependencies that were not packaged
    pub skipped_dependencies: Vec<Artifact>,

    /// Zip archive, when requested
    pub archive: Option<PathBuf>,
}

/// Assembles one module from what a build host provides
pub struct Assembler<'a, H: BuildHost + ?Sized> {
    host: &'a H,
    settings: ModuleSettings,
}

impl<'a, H: BuildHost + ?Sized> Assembler<'a, H> {
    pub fn new(host: &'a H, settings: ModuleSettings) -> Self {
        Self { host, settings }
    }

    pub fn settings(&self) -> &ModuleSettings {
        &self.settings
    }

    /// Run every assembly step in order; the first failure aborts the build
    pub async fn assemble(&self) -> AssembleResult<AssemblyReport> {
        self.settings.validate()?;

        let module_dir = self.create_module_dir().await?;

        let descriptor = ModDescriptor::from_settings(&self.settings);
        let descriptor_path = descriptor.write_to(&module_dir).await?;

        let mut copied_files = Vec::new();

        for root in self.host.script_source_roots() {
            if root.is_empty() {
                continue;
            }
            let scripts_dir = PathBuf::from(&root);
            if fs::try_exists(&scripts_dir).await.unwrap_or(false) {
                copied_files.extend(copy_tree(&scripts_dir, &module_dir).await?);
            } else {
                debug!("Script source root {} does not exist", scripts_dir.display());
            }
        }

        let classes_dir = self.host.classes_directory();
        if fs::try_exists(&classes_dir).await.unwrap_or(false) {
            copied_files.extend(copy_tree(&classes_dir, &module_dir).await?);
        } else {
            debug!("Classes directory {} does not exist", classes_dir.display());
        }

        let resources = self
            .copy_resources(&self.host.resources(), &module_dir)
            .await?;

        let deps = copy_dependencies(
            &self.host.dependency_artifacts(),
            &module_dir,
            &self.settings.module_name,
        )
        .await?;

        let archive = if self.settings.zip {
            let dest = self
                .settings
                .output_directory
                .join(format!("{}.zip", self.settings.module_name));
            let (dir, name, zip_dest) = (
                module_dir.clone(),
                self.settings.module_name.clone(),
                dest.clone(),
            );
            let archived = tokio::task::spawn_blocking(move || zip_module(&dir, &name, &zip_dest))
                .await
                .map_err(|e| AssembleError::archive(&dest, std::io::Error::other(e)))??;
            Some(archived)
        } else {
            None
        };

        Ok(AssemblyReport {
            module_dir,
            descriptor_path,
            descriptor,
            copied_files,
            resources,
            dependencies: deps.copied,
            skipped_dependencies: deps.skipped,
            archive,
        })
    }

    async fn create_module_dir(&self) -> AssembleResult<PathBuf> {
        let module_dir = self.settings.module_dir();
        if !fs::try_exists(&module_dir).await.unwrap_or(false) {
            fs::create_dir_all(&module_dir)
                .await
                .map_err(|source| AssembleError::CreateModuleDir {
                    path: module_dir.clone(),
                    source,
                })?;
        }
        Ok(module_dir)
    }

    /// Copy single resource files, by file name, into the module root
    async fn copy_resources(
        &self,
        resources: &[Resource],
        module_dir: &Path,
    ) -> AssembleResult<Vec<PathBuf>> {
        let mut copied = Vec::new();

        for target_path in resources
            .iter()
            .filter_map(|r| r.target_path.as_deref())
            .filter(|p| !p.is_empty())
        {
            let file = PathBuf::from(target_path);
            let copy_error = |source| AssembleError::CopyResource {
                file: file.clone(),
                dest: module_dir.to_path_buf(),
                source,
            };

            let file_name = file.file_name().ok_or_else(|| {
                copy_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "resource path has no file name",
                ))
            })?;

            info!(
                "Copying resource: [{}] -> [/{}]",
                file_name.to_string_lossy(),
                self.settings.module_name
            );

            let dest = module_dir.join(file_name);
            fs::copy(&file, &dest).await.map_err(copy_error)?;
            copied.push(dest);
        }

        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MOD_JSON, MOD_LIB};
    use std::fs as sync_fs;
    use tempfile::TempDir;

    struct TestHost {
        root: TempDir,
        roots: Vec<String>,
        resources: Vec<Resource>,
        artifacts: Vec<Artifact>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
                roots: Vec::new(),
                resources: Vec::new(),
                artifacts: Vec::new(),
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.path().join(rel)
        }

        fn write(&self, rel: &str, contents: &str) -> PathBuf {
            let path = self.path(rel);
            sync_fs::create_dir_all(path.parent().unwrap()).unwrap();
            sync_fs::write(&path, contents).unwrap();
            path
        }
    }

    impl BuildHost for TestHost {
        fn build_directory(&self) -> PathBuf {
            self.path("target")
        }
        fn classes_directory(&self) -> PathBuf {
            self.path("target/classes")
        }
        fn script_source_roots(&self) -> Vec<String> {
            self.roots.clone()
        }
        fn resources(&self) -> Vec<Resource> {
            self.resources.clone()
        }
        fn dependency_artifacts(&self) -> Vec<Artifact> {
            self.artifacts.clone()
        }
        fn group_id(&self) -> &str {
            "com.acme"
        }
        fn artifact_id(&self) -> &str {
            "chat"
        }
        fn version(&self) -> &str {
            "1.0"
        }
    }

    #[tokio::test]
    async fn test_assembles_full_module() {
        let mut host = TestHost::new();
        host.write("target/classes/org/acme/App.class", "class");
        host.write("src/main/scripts/app.js", "script");
        host.roots = vec![
            host.path("src/main/scripts").to_string_lossy().into_owned(),
            String::new(),
            host.path("src/missing").to_string_lossy().into_owned(),
        ];
        let banner = host.write("extra/banner.txt", "hi");
        host.resources = vec![
            Resource {
                target_path: Some(banner.to_string_lossy().into_owned()),
            },
            Resource { target_path: None },
        ];
        let jar = host.write("repo/netty.jar", "jar");
        host.artifacts = vec![
            Artifact {
                artifact_id: "netty".to_string(),
                scope: Some("compile".to_string()),
                file: Some(jar),
                ..Default::default()
            },
            Artifact {
                artifact_id: "junit".to_string(),
                scope: Some("test".to_string()),
                file: Some(host.write("repo/junit.jar", "junit")),
                ..Default::default()
            },
        ];

        let mut settings = ModuleSettings::from_host(&host);
        settings.main = Some("app.js".to_string());

        let report = Assembler::new(&host, settings).assemble().await.unwrap();

        let module = host.path("target/com.acme.chat-v1.0");
        assert_eq!(report.module_dir, module);
        assert_eq!(
            sync_fs::read_to_string(module.join(MOD_JSON)).unwrap(),
            r#"{"main":"app.js"}"#
        );
        assert!(module.join("app.js").is_file());
        assert!(module.join("org/acme/App.class").is_file());
        assert!(module.join("banner.txt").is_file());
        assert!(module.join(MOD_LIB).join("netty.jar").is_file());
        assert!(!module.join(MOD_LIB).join("junit.jar").exists());
        assert_eq!(report.copied_files.len(), 2);
        assert_eq!(report.skipped_dependencies.len(), 1);
        assert!(report.archive.is_none());
    }

    #[tokio::test]
    async fn test_minimal_module_only_has_descriptor() {
        let host = TestHost::new();
        let report = Assembler::new(&host, ModuleSettings::from_host(&host))
            .assemble()
            .await
            .unwrap();

        let entries: Vec<_> = sync_fs::read_dir(&report.module_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(MOD_JSON)]);
        assert_eq!(
            sync_fs::read_to_string(&report.descriptor_path).unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn test_reassembly_overwrites() {
        let host = TestHost::new();
        host.write("target/classes/app.js", "v1");
        let settings = ModuleSettings::from_host(&host);

        Assembler::new(&host, settings.clone())
            .assemble()
            .await
            .unwrap();
        host.write("target/classes/app.js", "v2");
        let report = Assembler::new(&host, settings).assemble().await.unwrap();

        assert_eq!(
            sync_fs::read_to_string(report.module_dir.join("app.js")).unwrap(),
            "v2"
        );
    }

    #[tokio::test]
    async fn test_zip_written_next_to_module() {
        let host = TestHost::new();
        host.write("target/classes/app.js", "js");
        let mut settings = ModuleSettings::from_host(&host);
        settings.zip = true;

        let report = Assembler::new(&host, settings).assemble().await.unwrap();

        let expected = host.path("target/com.acme.chat-v1.0.zip");
        assert_eq!(report.archive, Some(expected.clone()));
        assert!(expected.is_file());
    }

    #[tokio::test]
    async fn test_module_inside_classes_directory() {
        let host = TestHost::new();
        host.write("target/classes/app.js", "js");
        let mut settings = ModuleSettings::from_host(&host);
        settings.output_directory = host.path("target/classes");
        settings.module_name = "m".to_string();

        let report = Assembler::new(&host, settings).assemble().await.unwrap();

        assert_eq!(report.module_dir, host.path("target/classes/m"));
        assert!(report.module_dir.join("app.js").is_file());
        assert!(!report.module_dir.join("m").exists());
    }

    #[tokio::test]
    async fn test_missing_resource_fails() {
        let mut host = TestHost::new();
        host.resources = vec![Resource {
            target_path: Some(host.path("nope.txt").to_string_lossy().into_owned()),
        }];

        let err = Assembler::new(&host, ModuleSettings::from_host(&host))
            .assemble()
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("unable to copy resource"));
    }

    #[tokio::test]
    async fn test_module_folder_blocked_by_file() {
        let host = TestHost::new();
        host.write("target/blocker", "file");
        let mut settings = ModuleSettings::from_host(&host);
        settings.output_directory = host.path("target/blocker");

        let err = Assembler::new(&host, settings).assemble().await.unwrap_err();
        assert!(matches!(err, AssembleError::CreateModuleDir { .. }));
    }

    #[tokio::test]
    async fn test_invalid_name_is_rejected_before_writing() {
        let host = TestHost::new();
        let mut settings = ModuleSettings::from_host(&host);
        settings.module_name = String::new();

        let err = Assembler::new(&host, settings).assemble().await.unwrap_err();
        assert!(matches!(err, AssembleError::EmptyModuleName));
        assert!(!host.path("target").exists());
    }
}
