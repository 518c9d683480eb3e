//! `.dat` archive reader.
//!
//! Loading runs header, manifest and id table readers once, in that order;
//! afterwards the tables are immutable. Payload reads share the single file
//! handle, so they take `&mut self`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, info};

use crate::codec::Codec;
use crate::deframe::deframe;
use crate::format::ARCHIVE_EXTENSION;
use crate::header::ArchiveHeader;
use crate::index::IdIndex;
use crate::manifest::{Manifest, ManifestEntry, ManifestHeader};
use crate::options::ArchiveOptions;
use crate::search::IdField;
use crate::source::DatSource;
use crate::{Error, Result};

/// A loaded `.dat` archive.
pub struct DatArchive<R = BufReader<File>> {
    source: DatSource<R>,
    options: ArchiveOptions,
    header: ArchiveHeader,
    manifest: Manifest,
    index: IdIndex,
}

impl DatArchive {
    /// Open an archive file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, ArchiveOptions::default())
    }

    /// Open an archive file.
    ///
    /// The extension check runs before the file is opened.
    pub fn open_with<P: AsRef<Path>>(path: P, options: ArchiveOptions) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();

        if options.check_extension && !has_archive_extension(path) {
            return Err(Error::InvalidExtension { path: name });
        }

        let file = File::open(path).map_err(|source| Error::Load {
            archive: name.clone(),
            offset: 0,
            source,
        })?;

        Self::from_reader(BufReader::new(file), name, options)
    }
}

impl<R: Read + Seek> DatArchive<R> {
    /// Load an archive from any seekable source.
    ///
    /// `name` identifies the archive in errors and logs.
    pub fn from_reader(
        mut reader: R,
        name: impl Into<String>,
        options: ArchiveOptions,
    ) -> Result<Self> {
        let name = name.into();

        let header = ArchiveHeader::read(&mut reader, &name, options.check_identity)?;
        let mut source = DatSource::new(reader, name)?;
        let manifest = Manifest::read(&mut source, header.manifest_offset, options.check_identity)?;
        let index = IdIndex::read(&mut source, &manifest)?;

        info!(
            archive = source.name(),
            bytes = source.len(),
            entries = manifest.len(),
            ids = index.len(),
            "loaded archive"
        );

        Ok(Self {
            source,
            options,
            header,
            manifest,
            index,
        })
    }

    /// Read the stored bytes of entry `index`.
    ///
    /// Nothing is cached; repeated calls read the file again.
    pub fn read_raw(&mut self, index: usize) -> Result<Vec<u8>> {
        let entry = *self.entry(index)?;
        self.read_entry(&entry)
    }

    /// Read the stored bytes of `entry`.
    pub fn read_entry(&mut self, entry: &ManifestEntry) -> Result<Vec<u8>> {
        self.source.read_at(entry.offset, entry.size)
    }

    /// Read entry `index` with its chunk checksums removed.
    ///
    /// Records the resulting length as the entry's `uncompressed_size`.
    pub fn deframe(&mut self, index: usize) -> Result<Vec<u8>> {
        let raw = self.read_raw(index)?;
        let data = deframe(&raw, self.header.chunk_size, self.options.checksums)?;

        if let Some(entry) = self.manifest.get_mut(index) {
            entry.uncompressed_size = Some(data.len() as u32);
        }
        debug!(index, raw = raw.len(), deframed = data.len(), "deframed entry");

        Ok(data)
    }

    /// Deframe entry `index` and hand it to `codec` for decompression.
    pub fn read_decoded<C: Codec + ?Sized>(&mut self, index: usize, codec: &C) -> Result<Vec<u8>> {
        let data = self.deframe(index)?;
        let compression_flag = self.entry(index)?.compression_flag;

        codec
            .decompress(&data, compression_flag)
            .map_err(|source| Error::Codec {
                index,
                compression_flag,
                source,
            })
    }
}

impl<R> DatArchive<R> {
    /// Archive name used in errors and logs.
    #[inline]
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Total archive length in bytes.
    #[inline]
    pub fn file_len(&self) -> u64 {
        self.source.len()
    }

    /// The options this archive was loaded with.
    #[inline]
    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// The archive header.
    #[inline]
    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// The manifest header.
    #[inline]
    pub fn manifest_header(&self) -> &ManifestHeader {
        self.manifest.header()
    }

    /// The manifest.
    #[inline]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// All manifest entries in file order.
    #[inline]
    pub fn entries(&self) -> &[ManifestEntry] {
        self.manifest.entries()
    }

    /// Number of manifest entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.manifest.len()
    }

    /// Get entry by index.
    pub fn entry(&self, index: usize) -> Result<&ManifestEntry> {
        self.manifest.get(index).ok_or(Error::EntryNotFound {
            index,
            count: self.manifest.len(),
        })
    }

    /// The id table.
    #[inline]
    pub fn id_index(&self) -> &IdIndex {
        &self.index
    }

    /// Search the id table. See [`IdIndex::find`].
    pub fn find(&self, query: u32, field: IdField) -> BTreeSet<u32> {
        self.index.find(query, field)
    }

    /// Release the underlying reader.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<R> std::fmt::Debug for DatArchive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatArchive")
            .field("name", &self.name())
            .field("file_len", &self.file_len())
            .field("entries", &self.manifest.len())
            .field("ids", &self.index.len())
            .finish()
    }
}

fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}
