//! Manifest (MFT) reader.
//!
//! The manifest is the archive's allocation table: a short header followed by
//! fixed-size entries, each locating one payload. Entry positions are stable
//! and meaningful, so the table keeps file order.

use std::io::{Read, Seek};

use tracing::debug;

use crate::format::{RawManifestEntry, RawManifestHeader};
use crate::source::DatSource;
use crate::{Error, Result};

/// Manifest header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ManifestHeader {
    /// Identifier bytes.
    pub identifier: [u8; 4],
    /// Unknown.
    pub unknown: u64,
    /// Slot count as stored, one more than the number of real entries.
    pub raw_entry_count: u32,
    /// Unknown.
    pub unknown2: u32,
    /// Unknown.
    pub unknown3: u32,
}

impl ManifestHeader {
    /// Number of real entries in the table.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.raw_entry_count.saturating_sub(1) as usize
    }

    /// Identifier bytes with non-printable characters escaped.
    pub fn identifier_display(&self) -> String {
        self.identifier.escape_ascii().to_string()
    }
}

impl From<RawManifestHeader> for ManifestHeader {
    fn from(raw: RawManifestHeader) -> Self {
        Self {
            identifier: raw.identifier,
            unknown: raw.unknown.get(),
            raw_entry_count: raw.raw_entry_count.get(),
            unknown2: raw.unknown2.get(),
            unknown3: raw.unknown3.get(),
        }
    }
}

/// A manifest entry locating one payload in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ManifestEntry {
    /// Absolute payload offset.
    pub offset: u64,
    /// Payload size on disk, checksum words included.
    pub size: u32,
    /// Compression scheme, interpreted by the codec.
    pub compression_flag: u16,
    /// Entry flags.
    pub entry_flag: u16,
    /// Counter.
    pub counter: u32,
    /// Payload checksum.
    pub crc: u32,
    /// Deframed payload size, known once the entry has been deframed.
    pub uncompressed_size: Option<u32>,
}

impl ManifestEntry {
    /// End offset of the payload (exclusive), if it does not overflow.
    #[inline]
    pub fn end(&self) -> Option<u64> {
        self.offset.checked_add(u64::from(self.size))
    }
}

impl From<RawManifestEntry> for ManifestEntry {
    fn from(raw: RawManifestEntry) -> Self {
        Self {
            offset: raw.offset.get(),
            size: raw.size.get(),
            compression_flag: raw.compression_flag.get(),
            entry_flag: raw.entry_flag.get(),
            counter: raw.counter.get(),
            crc: raw.crc.get(),
            uncompressed_size: None,
        }
    }
}

/// The manifest header together with its entry table.
#[derive(Debug, Clone)]
pub struct Manifest {
    header: ManifestHeader,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read the manifest located at `offset`.
    pub fn read<R: Read + Seek>(
        source: &mut DatSource<R>,
        offset: u64,
        check_identity: bool,
    ) -> Result<Self> {
        let raw: RawManifestHeader = source.load_struct("manifest header", offset)?;
        let header = ManifestHeader::from(raw);

        if check_identity && header.identifier != RawManifestHeader::IDENTIFIER {
            return Err(Error::InvalidIdentifier {
                archive: source.name().to_string(),
                section: "manifest header",
                expected: RawManifestHeader::IDENTIFIER.to_vec(),
                actual: header.identifier.to_vec(),
            });
        }

        if header.raw_entry_count == 0 {
            return Err(Error::EmptyManifest {
                archive: source.name().to_string(),
            });
        }

        let entries_offset = offset
            .checked_add(RawManifestHeader::SIZE as u64)
            .ok_or_else(|| Error::Truncated {
                archive: source.name().to_string(),
                section: "manifest entries",
                offset,
                expected: RawManifestHeader::SIZE as u64,
                available: 0,
            })?;

        let count = header.entry_count();
        let entries: Vec<ManifestEntry> = source
            .load_array::<RawManifestEntry>("manifest entries", entries_offset, count)?
            .into_iter()
            .map(ManifestEntry::from)
            .collect();

        debug!(
            offset,
            raw_entry_count = header.raw_entry_count,
            entries = entries.len(),
            "read manifest"
        );

        Ok(Self { header, entries })
    }

    /// Build a manifest from already decoded parts.
    pub fn new(header: ManifestHeader, entries: Vec<ManifestEntry>) -> Self {
        Self { header, entries }
    }

    /// The manifest header.
    #[inline]
    pub fn header(&self) -> &ManifestHeader {
        &self.header
    }

    /// All entries in file order.
    #[inline]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ManifestEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ManifestEntry> {
        self.entries.get_mut(index)
    }
}
