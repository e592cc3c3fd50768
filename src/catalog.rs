//! Listing of the comic archives in a folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Lower-case suffix of archive files
pub const ARCHIVE_EXTENSION: &str = ".cbz";

pub fn is_archive_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(ARCHIVE_EXTENSION)
}

/// Archives directly inside `dir`, sorted by file name.
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_archive_name(&entry.file_name().to_string_lossy()) {
            archives.push(entry.path());
        }
    }
    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), archives = archives.len(), "listed archives");
    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn lists_only_cbz_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.cbz", "A.CBZ", "notes.txt", "c.zip"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("folder.cbz")).unwrap();

        let names: Vec<_> = list_archives(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["A.CBZ", "b.cbz"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_archives(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
