//! Page index: the image entries of an archive in reading order.
//!
//! Reading order is descending by entry name, compared as plain strings.
//! There is no numeric awareness, so `"10.png"` sorts before `"2.png"`.

use std::path::Path;

use crate::error::Result;
use crate::io::ReadAt;
use crate::zip::ZipArchive;

/// Lower-case suffixes of entries that count as pages
pub const PAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];

/// Whether an entry name looks like a page image (case-insensitive suffix).
pub fn is_page_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    PAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Entry names selected as pages, sorted descending.
///
/// Immutable once built; a new archive gets a new index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    names: Vec<String>,
}

impl PageIndex {
    /// Open the archive at `path` and index its pages.
    ///
    /// The archive is only read for its central directory; nothing is decoded.
    pub fn build(path: &Path) -> Result<Self> {
        let archive = ZipArchive::open(path)?;
        Ok(Self::from_archive(&archive))
    }

    pub fn from_archive<R: ReadAt>(archive: &ZipArchive<R>) -> Self {
        Self::from_names(archive.file_names())
    }

    /// Filter `names` down to page images and sort them into reading order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .filter(|n| is_page_name(n.as_ref()))
            .map(|n| n.as_ref().to_string())
            .collect();
        names.sort_unstable_by(|a, b| b.cmp(a));
        tracing::debug!(pages = names.len(), "built page index");
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}
