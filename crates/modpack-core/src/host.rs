//! Build host trait and the records it hands over
//!
//! The build host owns dependency resolution and the project model. This crate
//! only reads from it, through the `BuildHost` trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Interface to the build that produced the module contents
///
/// Each host (the YAML project file, a test double, an embedding build tool)
/// implements this trait to provide:
/// - Build locations (output directory, compiled classes)
/// - Script source roots and single resource files
/// - Resolved dependency artifacts
/// - Project coordinates for the default module name
pub trait BuildHost {
    /// Build output directory; modules are assembled here by default
    fn build_directory(&self) -> PathBuf;

    /// Directory holding compiled classes and processed resources
    fn classes_directory(&self) -> PathBuf;

    /// Script source directories, copied verbatim into the module
    fn script_source_roots(&self) -> Vec<String>;

    /// Single resource files copied into the module root
    fn resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// Dependency artifacts of the project
    fn dependency_artifacts(&self) -> Vec<Artifact>;

    /// Project group id
    fn group_id(&self) -> &str;

    /// Project artifact id
    fn artifact_id(&self) -> &str;

    /// Project version
    fn version(&self) -> &str;

    /// Module name used when none is configured: `group.artifact-vversion`
    fn default_module_name(&self) -> String {
        format!(
            "{}.{}-v{}",
            self.group_id(),
            self.artifact_id(),
            self.version()
        )
    }
}

/// A dependency record as resolved by the build host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub group_id: String,

    #[serde(default)]
    pub artifact_id: String,

    #[serde(default)]
    pub version: String,

    /// Dependency scope as the host reports it (e.g. "compile")
    #[serde(default)]
    pub scope: Option<String>,

    /// Resolved file on disk; unresolved artifacts have none
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Artifact {
    /// Parsed scope of this artifact, if it has a non-empty one
    pub fn scope(&self) -> Option<Scope> {
        self.scope
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(Scope::parse)
    }

    /// Whether this artifact goes into the module's lib folder
    pub fn is_packaged(&self) -> bool {
        self.file.is_some() && self.scope().is_some_and(|s| s.is_packaged())
    }
}

/// Dependency scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    Import,
    Other(String),
}

impl Scope {
    /// Parse a scope string; matching is exact and case-sensitive
    pub fn parse(s: &str) -> Self {
        match s {
            "compile" => Scope::Compile,
            "runtime" => Scope::Runtime,
            "provided" => Scope::Provided,
            "test" => Scope::Test,
            "system" => Scope::System,
            "import" => Scope::Import,
            other => Scope::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
            Scope::Other(s) => s,
        }
    }

    /// Only compile and runtime dependencies are needed by a running module
    pub fn is_packaged(&self) -> bool {
        matches!(self, Scope::Compile | Scope::Runtime)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single resource file of the project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Path of the file to copy; resources without one are ignored
    #[serde(default)]
    pub target_path: Option<String>,
}
