//! The page sequencer: one open archive, its page index and a cursor.
//!
//! The sequencer owns the archive handle from the moment an archive is
//! opened until it is replaced or closed, so every page turn reads from the
//! same handle. Stepping never decodes; callers fetch
//! [`Sequencer::current_page`] after moving.

use std::path::{Path, PathBuf};

use crate::cursor::{Cursor, Progress, Step};
use crate::error::Result;
use crate::index::PageIndex;
use crate::io::LocalFileReader;
use crate::loader::{self, DecodedPage};
use crate::zip::ZipArchive;

/// Which of the three states the sequencer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// No archive open
    Empty,
    /// Archive open with at least one page
    Loaded,
    /// Archive open but it has no page images
    EmptyArchive,
}

/// The page at the cursor, ready to hand to a renderer
#[derive(Debug, Clone)]
pub struct CurrentPage {
    pub image: DecodedPage,
    pub title: String,
    pub progress: Progress,
    pub entry: String,
}

/// Archive name without its extension: `/x/One Piece.cbz` gives `One Piece`.
///
/// Only the last extension goes, and a name that is all extension
/// (`/x/.cbz`) gives an empty title.
pub fn title_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

struct OpenArchive {
    path: PathBuf,
    title: String,
    archive: ZipArchive<LocalFileReader>,
    index: PageIndex,
    /// `None` exactly when the index is empty
    cursor: Option<Cursor>,
}

#[derive(Default)]
pub struct Sequencer {
    open: Option<OpenArchive>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` and make it the active archive.
    ///
    /// On failure the previously active archive (if any) stays active. On
    /// success the previous handle is released.
    pub fn open_archive(&mut self, path: &Path) -> Result<SequencerState> {
        let archive = ZipArchive::open(path)?;
        let index = PageIndex::from_archive(&archive);
        let cursor = Cursor::initial(index.len());
        let title = title_from_path(path);

        tracing::info!(
            archive = %path.display(),
            pages = index.len(),
            "opened archive"
        );

        if let Some(previous) = self.open.replace(OpenArchive {
            path: path.to_path_buf(),
            title,
            archive,
            index,
            cursor,
        }) {
            tracing::debug!(archive = %previous.path.display(), "released archive");
        }

        Ok(self.state())
    }

    /// Release the active archive, if any.
    pub fn close(&mut self) {
        if let Some(previous) = self.open.take() {
            tracing::info!(archive = %previous.path.display(), "closed archive");
        }
    }

    pub fn state(&self) -> SequencerState {
        match &self.open {
            None => SequencerState::Empty,
            Some(open) if open.cursor.is_some() => SequencerState::Loaded,
            Some(_) => SequencerState::EmptyArchive,
        }
    }

    /// Decode the page at the cursor.
    ///
    /// Returns `Ok(None)` when there is no page to show. A page that fails
    /// to extract or decode leaves the cursor where it is.
    pub fn current_page(&self) -> Result<Option<CurrentPage>> {
        let Some(open) = &self.open else {
            return Ok(None);
        };
        let Some(cursor) = open.cursor else {
            return Ok(None);
        };
        let Some(entry) = open.index.get(cursor.position()) else {
            return Ok(None);
        };

        let image = loader::load_page(&open.archive, entry).inspect_err(|e| {
            tracing::warn!(entry, error = %e, "failed to load page");
        })?;

        Ok(Some(CurrentPage {
            image,
            title: open.title.clone(),
            progress: cursor.progress(),
            entry: entry.to_string(),
        }))
    }

    /// Move one page on in reading order. `None` unless loaded.
    pub fn advance(&mut self) -> Option<Step> {
        self.cursor_mut().map(Cursor::step_forward)
    }

    /// Move one page back in reading order. `None` unless loaded.
    pub fn retreat(&mut self) -> Option<Step> {
        self.cursor_mut().map(Cursor::step_backward)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.cursor().map(|c| c.progress())
    }

    pub fn title(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.title.as_str())
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.open.as_ref().map(|o| o.path.as_path())
    }

    pub fn page_index(&self) -> Option<&PageIndex> {
        self.open.as_ref().map(|o| &o.index)
    }

    /// The active archive, for callers that want entry metadata
    pub fn archive(&self) -> Option<&ZipArchive<LocalFileReader>> {
        self.open.as_ref().map(|o| &o.archive)
    }

    /// Name of the entry under the cursor
    pub fn current_entry(&self) -> Option<&str> {
        let open = self.open.as_ref()?;
        open.index.get(open.cursor?.position())
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.open.as_ref().and_then(|o| o.cursor)
    }

    fn cursor_mut(&mut self) -> Option<&mut Cursor> {
        self.open.as_mut().and_then(|o| o.cursor.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_strips_extension() {
        assert_eq!(title_from_path(Path::new("/x/One Piece.cbz")), "One Piece");
        assert_eq!(title_from_path(Path::new("vol.01.cbz")), "vol.01");
        assert_eq!(title_from_path(Path::new("plain")), "plain");
        assert_eq!(title_from_path(Path::new("/x/.cbz")), "");
    }

    #[test]
    fn fresh_sequencer_has_nothing() {
        let mut seq = Sequencer::new();
        assert_eq!(seq.state(), SequencerState::Empty);
        assert!(seq.current_page().unwrap().is_none());
        assert_eq!(seq.advance(), None);
        assert_eq!(seq.retreat(), None);
        assert_eq!(seq.progress(), None);
        assert_eq!(seq.title(), None);
    }
}
