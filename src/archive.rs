//! Archive reading
//!
//! Wraps a ZIP container held fully in memory. Opening parses the central
//! directory and fails with [`Error::MalformedArchive`] if the container is
//! unreadable. Entry content is decompressed on demand; a bad entry yields
//! [`Error::CorruptEntry`] for that entry only, without invalidating the rest
//! of the archive.

use crate::error::{Error, Result};
use std::io::{Cursor, Read};
use tracing::debug;

/// Metadata view of one archive entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full internal path within the archive (e.g., `photos/4521.png`)
    pub path: String,
    /// Whether the entry is a directory
    pub is_directory: bool,
}

/// A ZIP archive of photographs, held in memory for the lifetime of one batch run
#[derive(Debug)]
pub struct PhotoArchive {
    inner: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl PhotoArchive {
    /// Parse raw archive bytes
    ///
    /// Fails with [`Error::MalformedArchive`] when the container cannot be
    /// parsed at all.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let inner = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::MalformedArchive(e.to_string()))?;
        debug!(entries = inner.len(), "opened photo archive");
        Ok(Self { inner })
    }

    /// Number of entries in the archive, directories included
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the archive has no entries at all
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Read the metadata of the entry at `index` without touching its content
    pub fn entry(&mut self, index: usize) -> Result<ArchiveEntry> {
        let file = self
            .inner
            .by_index(index)
            .map_err(|e| Error::MalformedArchive(format!("failed to read entry {index}: {e}")))?;
        Ok(ArchiveEntry {
            path: file.name().to_string(),
            is_directory: file.is_dir(),
        })
    }

    /// Decompress and return the content of the entry at `index`
    ///
    /// A decompression or checksum failure is scoped to this entry and
    /// surfaces as [`Error::CorruptEntry`].
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut file = self.inner.by_index(index).map_err(|e| Error::CorruptEntry {
            name: format!("#{index}"),
            reason: e.to_string(),
        })?;
        let name = file.name().to_string();
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content).map_err(|e| Error::CorruptEntry {
            name,
            reason: e.to_string(),
        })?;
        Ok(content)
    }
}
