//! # cbzview
//!
//! Page sequencing for comic archives (`.cbz`, zip containers of page
//! images), read right-to-left.
//!
//! Opening an archive reads its central directory once, keeps the file
//! handle, and builds a [`PageIndex`] of the PNG/JPEG entries sorted by name
//! in descending order. A [`Cursor`] walks that index; the
//! [`Sequencer`] ties the pieces together and decodes the page under the
//! cursor into an RGBA buffer on demand.
//!
//! ## Features
//!
//! - Own ZIP reader: STORED and DEFLATE entries, ZIP64, CRC-32 checks
//! - PNG and JPEG pages, detected by signature, normalised to RGBA8
//! - Distinct errors for a bad archive and a bad page
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use cbzview::{Sequencer, Step};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut seq = Sequencer::new();
//!     seq.open_archive(Path::new("One Piece.cbz"))?;
//!
//!     loop {
//!         if let Some(page) = seq.current_page()? {
//!             println!("{} - {} ({}x{})", page.title, page.progress, page.image.width(), page.image.height());
//!         }
//!         if !matches!(seq.advance(), Some(Step::Moved(_))) {
//!             break;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod cursor;
pub mod error;
pub mod index;
pub mod io;
pub mod loader;
pub mod sequencer;
pub mod zip;

pub use catalog::list_archives;
pub use cli::Cli;
pub use cursor::{Cursor, Progress, Step};
pub use error::{Error, Result};
pub use index::PageIndex;
pub use io::{LocalFileReader, ReadAt};
pub use loader::DecodedPage;
pub use sequencer::{CurrentPage, Sequencer, SequencerState, title_from_path};
pub use zip::{ZipArchive, ZipFileEntry};
