//! Modpack Core - Shared library for assembling Vert.x modules
//!
//! This library turns the output of a build into a deployable module directory:
//! a folder named after the module, a `mod.json` descriptor, the compiled classes
//! and scripts, and the runtime dependencies under `lib/`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Tree copying, dependency filtering, descriptor and archive writing
//! - **Layer 2: Workflow Orchestration** - `BuildHost` trait and `Assembler` driving the steps
//! - **Layer 3: Project Description** - `ProjectManifest`, the YAML file a build host emits
//!
//! # Example Usage
//!
//! ```ignore
//! use modpack_core::{Assembler, ModuleSettings, ProjectManifest};
//!
//! let project = ProjectManifest::load("modpack.yaml".as_ref())?;
//! let settings = ModuleSettings::from_host(&project);
//! let report = Assembler::new(&project, settings).assemble().await?;
//! println!("assembled {}", report.module_dir.display());
//! ```

pub mod assembly;
pub mod config;
pub mod error;
pub mod host;
pub mod project;

// Re-export main types for convenience
pub use assembly::{copy_dependencies, copy_tree, zip_module, Assembler, AssemblyReport};
pub use config::{ModDescriptor, ModuleSettings, SettingsOverrides};
pub use error::{AssembleError, AssembleResult};
pub use host::{Artifact, BuildHost, Resource, Scope};
pub use project::ProjectManifest;

/// Fixed file name of the module descriptor
pub const MOD_JSON: &str = "mod.json";

/// Name of the dependency folder inside a module
pub const MOD_LIB: &str = "lib";
