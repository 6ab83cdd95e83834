//! Errors that fail a module assembly

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type AssembleResult<T> = Result<T, AssembleError>;

/// Every way an assembly can fail. The message is what the build reports.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("module name must not be empty")]
    EmptyModuleName,

    #[error("module name '{0}' must be a single path component")]
    InvalidModuleName(String),

    #[error("unable to create module folder: {}", path.display())]
    CreateModuleDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to create module lib folder: {}", path.display())]
    CreateLibDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to create module descriptor ({}): {source}", path.display())]
    WriteDescriptor {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to serialize module descriptor")]
    SerializeDescriptor(#[source] serde_json::Error),

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("unable to copy {} to module folder", from.display())]
    CopyTree {
        from: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to copy resource ({}) to ({}): {source}", file.display(), dest.display())]
    CopyResource {
        file: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to copy dependency ({}) to ({}): {source}", file.display(), dest.display())]
    CopyDependency {
        file: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to archive module into {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl AssembleError {
    pub(crate) fn copy_tree(from: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CopyTree {
            from: from.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: impl Into<zip::result::ZipError>) -> Self {
        Self::Archive {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_build_failures() {
        let err = AssembleError::NotADirectory {
            path: PathBuf::from("/tmp/missing"),
        };
        assert_eq!(err.to_string(), "/tmp/missing is not a directory");

        let err = AssembleError::CopyDependency {
            file: PathBuf::from("/repo/a.jar"),
            dest: PathBuf::from("/out/mod/lib"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "unable to copy dependency (/repo/a.jar) to (/out/mod/lib): gone"
        );
    }
}
