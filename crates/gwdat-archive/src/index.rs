//! Id table reader.
//!
//! One reserved manifest entry holds a flat table of `(file_id, base_id)`
//! pairs. Many file ids can map to the same base id, which groups related
//! assets.

use std::io::{Read, Seek};

use tracing::debug;

use crate::format::{RawIndexRecord, ID_TABLE_ENTRY_INDEX};
use crate::manifest::Manifest;
use crate::source::DatSource;
use crate::Result;

/// A single file id to base id mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexRecord {
    /// Id of an individual asset.
    pub file_id: u32,
    /// Id of the asset group that owns it.
    pub base_id: u32,
}

impl IndexRecord {
    /// Create a new record.
    #[inline]
    pub const fn new(file_id: u32, base_id: u32) -> Self {
        Self { file_id, base_id }
    }
}

impl From<RawIndexRecord> for IndexRecord {
    fn from(raw: RawIndexRecord) -> Self {
        Self::new(raw.file_id.get(), raw.base_id.get())
    }
}

/// The archive's id table, in file order.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    records: Vec<IndexRecord>,
}

impl IdIndex {
    /// Build an index from records.
    pub fn new(records: Vec<IndexRecord>) -> Self {
        Self { records }
    }

    /// Read the id table from the reserved manifest entry.
    ///
    /// A manifest too small to contain the reserved entry yields an empty
    /// index.
    pub fn read<R: Read + Seek>(source: &mut DatSource<R>, manifest: &Manifest) -> Result<Self> {
        let Some(entry) = manifest.get(ID_TABLE_ENTRY_INDEX) else {
            debug!(entries = manifest.len(), "manifest has no id table entry");
            return Ok(Self::default());
        };

        let count = entry.size as usize / RawIndexRecord::SIZE;
        let records: Vec<IndexRecord> = source
            .load_array::<RawIndexRecord>("id table", entry.offset, count)?
            .into_iter()
            .map(IndexRecord::from)
            .collect();

        debug!(offset = entry.offset, records = records.len(), "read id table");

        Ok(Self { records })
    }

    /// All records in file order.
    #[inline]
    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Base id owning `file_id`, taken from the first matching record.
    pub fn base_id_of(&self, file_id: u32) -> Option<u32> {
        self.records
            .iter()
            .find(|r| r.file_id == file_id)
            .map(|r| r.base_id)
    }

    /// File ids belonging to the asset group `base_id`, in file order.
    pub fn file_ids_of(&self, base_id: u32) -> impl Iterator<Item = u32> + '_ {
        self.records
            .iter()
            .filter(move |r| r.base_id == base_id)
            .map(|r| r.file_id)
    }
}

impl FromIterator<IndexRecord> for IdIndex {
    fn from_iter<I: IntoIterator<Item = IndexRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
