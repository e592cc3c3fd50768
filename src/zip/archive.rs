use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Upper bound on up-front allocation for an inflated entry
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

/// An open ZIP archive.
///
/// The central directory is parsed once when the archive is opened; entry
/// bytes are read from the retained source on demand.
pub struct ZipArchive<R: ReadAt> {
    parser: ZipParser<R>,
    entries: Vec<ZipFileEntry>,
    by_name: HashMap<String, usize>,
}

impl ZipArchive<LocalFileReader> {
    /// Open the archive at `path`, keeping the file handle for later reads.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = LocalFileReader::new(path)?;
        Self::new(reader)
    }
}

impl<R: ReadAt> ZipArchive<R> {
    pub fn new(reader: R) -> Result<Self> {
        let parser = ZipParser::new(reader);
        let entries = parser.list_files()?;
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.file_name.clone(), i))
            .collect();
        Ok(Self {
            parser,
            entries,
            by_name,
        })
    }

    /// All entries, in central directory order
    pub fn entries(&self) -> &[ZipFileEntry] {
        &self.entries
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.file_name.as_str())
    }

    pub fn entry(&self, name: &str) -> Option<&ZipFileEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Extract the named entry into memory.
    ///
    /// A missing name is [`Error::EntryNotFound`]; anything wrong with the
    /// entry's own bytes is [`Error::CorruptEntry`].
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry(name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))?;
        self.extract_to_memory(entry)
    }

    /// Extract file data to memory
    pub fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let name = entry.file_name.as_str();
        if entry.is_encrypted() {
            return Err(Error::corrupt(name, "entry is encrypted"));
        }

        let raw = self
            .parser
            .get_data_offset(entry)
            .and_then(|offset| self.parser.read_span(offset, entry.compressed_size))
            .map_err(|e| match e {
                Error::InvalidArchive(reason) => Error::corrupt(name, reason),
                other => other,
            })?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size.min(MAX_PREALLOC) as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size)
                    .read_to_end(&mut out)
                    .map_err(|e| Error::corrupt(name, format!("inflate failed: {e}")))?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(Error::corrupt(
                    name,
                    format!("unsupported compression method {method}"),
                ));
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(Error::corrupt(
                name,
                format!(
                    "expected {} bytes, got {}",
                    entry.uncompressed_size,
                    data.len()
                ),
            ));
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(Error::corrupt(
                name,
                format!("CRC mismatch: expected {:08x}, got {:08x}", entry.crc32, crc.sum()),
            ));
        }

        tracing::debug!(entry = name, bytes = data.len(), "extracted entry");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8], zip::CompressionMethod)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data, method) in entries {
            let options = SimpleFileOptions::default().compression_method(*method);
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
                continue;
            }
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn reads_stored_and_deflated_entries() {
        let text = b"page page page page page page page page".repeat(20);
        let data = build_zip(&[
            ("stored.bin", b"raw bytes", zip::CompressionMethod::Stored),
            ("deflated.bin", text.as_slice(), zip::CompressionMethod::Deflated),
        ]);
        let archive = ZipArchive::new(data).unwrap();

        assert_eq!(archive.read_entry("stored.bin").unwrap(), b"raw bytes");
        assert_eq!(archive.read_entry("deflated.bin").unwrap(), text);

        let deflated = archive.entry("deflated.bin").unwrap();
        assert_eq!(deflated.compression_method, CompressionMethod::Deflate);
        assert!(deflated.compressed_size < deflated.uncompressed_size);
    }

    #[test]
    fn missing_name_is_entry_not_found() {
        let data = build_zip(&[("001.png", b"x", zip::CompressionMethod::Stored)]);
        let archive = ZipArchive::new(data).unwrap();

        match archive.read_entry("002.png") {
            Err(Error::EntryNotFound(name)) => assert_eq!(name, "002.png"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn flipped_byte_fails_crc_check() {
        let mut data = build_zip(&[("001.png", b"PAGEDATA", zip::CompressionMethod::Stored)]);
        let pos = data
            .windows(8)
            .position(|w| w == b"PAGEDATA")
            .unwrap();
        data[pos] = b'X';

        let archive = ZipArchive::new(data).unwrap();
        assert!(matches!(
            archive.read_entry("001.png"),
            Err(Error::CorruptEntry { .. })
        ));
    }

    #[test]
    fn file_names_follow_directory_order() {
        let data = build_zip(&[
            ("b/", b"", zip::CompressionMethod::Stored),
            ("b/2.jpg", b"2", zip::CompressionMethod::Stored),
            ("a.png", b"1", zip::CompressionMethod::Stored),
        ]);
        let archive = ZipArchive::new(data).unwrap();

        let names: Vec<_> = archive.file_names().collect();
        assert_eq!(names, ["b/", "b/2.jpg", "a.png"]);
        assert!(archive.entries()[0].is_directory);
    }
}
