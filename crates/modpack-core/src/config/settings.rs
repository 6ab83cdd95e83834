//! Module parameters and how they are layered

use crate::error::{AssembleError, AssembleResult};
use crate::host::BuildHost;
use crate::project::ModuleSection;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolved parameters of one assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSettings {
    /// Directory the module folder is created in
    pub output_directory: PathBuf,

    /// Module folder name
    pub module_name: String,

    /// Main verticle; runnable modules need one
    pub main: Option<String>,

    /// Main verticle is a worker verticle
    pub worker: bool,

    /// Keep the caller's working directory instead of the module directory
    pub preserve_cwd: bool,

    /// Redeploy the module when files in its directory change
    pub auto_redeploy: bool,

    /// Modules whose resources are put on this module's path
    pub includes: Option<String>,

    /// Also write `<module_name>.zip` next to the module folder
    pub zip: bool,
}

/// Optional values layered over the host defaults
///
/// Fields left as `None` keep whatever the lower layer provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub output_directory: Option<PathBuf>,
    pub module_name: Option<String>,
    pub main: Option<String>,
    pub worker: Option<bool>,
    pub preserve_cwd: Option<bool>,
    pub auto_redeploy: Option<bool>,
    pub includes: Option<String>,
    pub zip: Option<bool>,
}

impl From<&ModuleSection> for SettingsOverrides {
    fn from(section: &ModuleSection) -> Self {
        Self {
            output_directory: None,
            module_name: section.name.clone(),
            main: section.main.clone(),
            worker: section.worker,
            preserve_cwd: section.preserve_cwd,
            auto_redeploy: section.auto_redeploy,
            includes: section.includes.clone(),
            zip: section.zip,
        }
    }
}

impl ModuleSettings {
    /// Defaults derived from the build host
    pub fn from_host<H: BuildHost + ?Sized>(host: &H) -> Self {
        Self {
            output_directory: host.build_directory(),
            module_name: host.default_module_name(),
            main: None,
            worker: false,
            preserve_cwd: false,
            auto_redeploy: false,
            includes: None,
            zip: false,
        }
    }

    /// Layer overrides on top of these settings
    pub fn apply(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(dir) = overrides.output_directory {
            self.output_directory = dir;
        }
        if let Some(name) = overrides.module_name {
            self.module_name = name;
        }
        if overrides.main.is_some() {
            self.main = overrides.main;
        }
        if let Some(worker) = overrides.worker {
            self.worker = worker;
        }
        if let Some(preserve_cwd) = overrides.preserve_cwd {
            self.preserve_cwd = preserve_cwd;
        }
        if let Some(auto_redeploy) = overrides.auto_redeploy {
            self.auto_redeploy = auto_redeploy;
        }
        if overrides.includes.is_some() {
            self.includes = overrides.includes;
        }
        if let Some(zip) = overrides.zip {
            self.zip = zip;
        }
        debug!("module settings: {:?}", self);
        self
    }

    /// Check the parameters the assembly cannot run without
    pub fn validate(&self) -> AssembleResult<()> {
        if self.module_name.trim().is_empty() {
            return Err(AssembleError::EmptyModuleName);
        }
        let mut components = Path::new(&self.module_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(AssembleError::InvalidModuleName(self.module_name.clone())),
        }
    }

    /// The module folder: `<output_directory>/<module_name>`
    pub fn module_dir(&self) -> PathBuf {
        self.output_directory.join(&self.module_name)
    }
}
