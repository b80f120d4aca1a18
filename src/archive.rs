//! Zip packaging of generated rosters

use crate::error::{RosterError, RosterResult};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Appends entries in order; nothing is written until [`finish`](Self::finish)
pub struct ArchivePackager {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
    entries: Vec<String>,
}

impl Default for ArchivePackager {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivePackager {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
            entries: Vec::new(),
        }
    }

    /// Add a deflated entry with exactly `bytes` as content
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> RosterResult<()> {
        if !self.names.insert(name.to_string()) {
            return Err(RosterError::DuplicateEntry(name.to_string()));
        }

        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(name, options)?;
        self.writer.write_all(bytes)?;
        self.entries.push(name.to_string());
        Ok(())
    }

    /// Entry names in insertion order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> RosterResult<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Read every entry of an archive, in archive order
pub fn read_entries(bytes: &[u8]) -> RosterResult<Vec<(String, Vec<u8>)>> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if !file.is_file() {
            continue;
        }
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        entries.push((file.name().to_string(), content));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_archive_is_valid() {
        let packager = ArchivePackager::new();
        assert!(packager.is_empty());
        let bytes = packager.finish().unwrap();
        assert!(read_entries(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_entries_preserved_exactly() {
        let mut packager = ArchivePackager::new();
        packager.add("Mar 27_Toronto_CPR_9AM.xlsx", b"first").unwrap();
        let big = vec![7u8; 64 * 1024];
        packager.add("Mar 27_Ottawa_CPR_9AM.xlsx", &big).unwrap();
        assert_eq!(packager.len(), 2);

        let entries = read_entries(&packager.finish().unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "Mar 27_Toronto_CPR_9AM.xlsx");
        assert_eq!(entries[0].1, b"first");
        assert_eq!(entries[1].1, big);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut packager = ArchivePackager::new();
        packager.add("a.xlsx", b"1").unwrap();
        let err = packager.add("a.xlsx", b"2").unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEntry(_)));
        assert_eq!(packager.entries(), ["a.xlsx".to_string()]);
    }

    #[test]
    fn test_read_entries_rejects_garbage() {
        assert!(read_entries(b"not a zip").is_err());
    }
}
