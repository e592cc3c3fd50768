use thiserror::Error;

/// Errors surfaced by the archive and page operations.
///
/// `InvalidArchive` and `Io` abort opening an archive. `CorruptEntry` and
/// `EntryNotFound` abort displaying a single page only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt entry {name}: {reason}")]
    CorruptEntry { name: String, reason: String },

    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}

impl Error {
    pub fn invalid(reason: impl std::fmt::Display) -> Self {
        Self::InvalidArchive(reason.to_string())
    }

    pub fn corrupt(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::CorruptEntry {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
