//! Zipping an assembled module
//!
//! The platform installs modules from zips whose entries are prefixed with the
//! module name: `{module_name}/mod.json`, `{module_name}/lib/...`.

use crate::error::{AssembleError, AssembleResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write the module folder into a zip archive at `dest`
///
/// Entries are sorted by path so the same module always yields the same
/// entry order.
pub fn zip_module(module_dir: &Path, module_name: &str, dest: &Path) -> AssembleResult<PathBuf> {
    if !module_dir.is_dir() {
        return Err(AssembleError::NotADirectory {
            path: module_dir.to_path_buf(),
        });
    }

    let file = File::create(dest).map_err(|e| AssembleError::archive(dest, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entries = WalkDir::new(module_dir)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(1);

    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|e| AssembleError::archive(dest, std::io::Error::from(e)))?;
        let Ok(relative) = entry.path().strip_prefix(module_dir) else {
            continue;
        };

        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let zip_path = format!("{}/{}", module_name, parts.join("/"));

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", zip_path), options)
                .map_err(|e| AssembleError::archive(dest, e))?;
            continue;
        }

        let content = std::fs::read(entry.path()).map_err(|e| AssembleError::archive(dest, e))?;
        zip.start_file(zip_path, options)
            .map_err(|e| AssembleError::archive(dest, e))?;
        zip.write_all(&content)
            .map_err(|e| AssembleError::archive(dest, e))?;
        count += 1;
    }

    zip.finish().map_err(|e| AssembleError::archive(dest, e))?;
    info!("Archived {} file(s) into [{}]", count, dest.display());

    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_entries_are_prefixed_with_module_name() {
        let out = tempfile::tempdir().unwrap();
        let module = out.path().join("com.acme.chat-v1");
        std::fs::create_dir_all(module.join("lib")).unwrap();
        std::fs::write(module.join("mod.json"), r#"{"main":"app.js"}"#).unwrap();
        std::fs::write(module.join("lib/netty.jar"), "jar").unwrap();

        let dest = out.path().join("com.acme.chat-v1.zip");
        zip_module(&module, "com.acme.chat-v1", &dest).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(names.contains(&"com.acme.chat-v1/mod.json".to_string()));
        assert!(names.contains(&"com.acme.chat-v1/lib/".to_string()));
        assert!(names.contains(&"com.acme.chat-v1/lib/netty.jar".to_string()));

        let mut contents = String::new();
        archive
            .by_name("com.acme.chat-v1/mod.json")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, r#"{"main":"app.js"}"#);
    }

    #[test]
    fn test_missing_module_dir() {
        let out = tempfile::tempdir().unwrap();
        let err = zip_module(&out.path().join("nope"), "nope", &out.path().join("nope.zip"))
            .unwrap_err();
        assert!(matches!(err, AssembleError::NotADirectory { .. }));
    }
}
