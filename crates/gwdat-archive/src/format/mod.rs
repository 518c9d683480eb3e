//! On-disk structures of the `.dat` archive format.
//!
//! Every structure is little-endian and tightly packed. The field types come
//! from [`zerocopy::byteorder::little_endian`], so the structs have alignment 1
//! and can be read straight from the stream on any host.
//!
//! Layout:
//!
//! ```text
//! @0                 ArchiveHeader (40 bytes)
//! @manifest_offset   ManifestHeader (24 bytes)
//!                    ManifestEntry x (raw_entry_count - 1), 24 bytes each
//! @entries[1].offset IndexRecord x (entries[1].size / 8), 8 bytes each
//! ```

mod header;
mod index;
mod manifest;

pub use header::RawArchiveHeader;
pub use index::RawIndexRecord;
pub use manifest::{RawManifestEntry, RawManifestHeader};

/// Width of the checksum word that closes every payload chunk.
pub const CHECKSUM_LEN: usize = 4;

/// Manifest slot holding the file id to base id mapping table.
///
/// The format carries no marker identifying this entry; it is a convention
/// observed in client archives. Other archive variants may place the table
/// elsewhere.
pub const ID_TABLE_ENTRY_INDEX: usize = 1;

/// File extension expected on archives opened by path.
pub const ARCHIVE_EXTENSION: &str = "dat";
