//! Manifest (MFT) structures.

use zerocopy::byteorder::little_endian::{U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Manifest header, found at the header's `manifest_offset`.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawManifestHeader {
    /// Identifier bytes (`Mft\x1A`)
    pub identifier: [u8; 4],
    /// Unknown
    pub unknown: U64,
    /// Number of entry slots, including one slot that is not a real entry
    pub raw_entry_count: U32,
    /// Unknown
    pub unknown2: U32,
    /// Unknown
    pub unknown3: U32,
}

impl RawManifestHeader {
    /// Identifier bytes of a client manifest.
    pub const IDENTIFIER: [u8; 4] = *b"Mft\x1A";

    /// Serialized size in bytes.
    pub const SIZE: usize = 24;
}

/// A single manifest entry. Entries follow the manifest header back to back.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawManifestEntry {
    /// Absolute payload offset
    pub offset: U64,
    /// Payload size on disk, checksum words included
    pub size: U32,
    /// Compression scheme of the payload
    pub compression_flag: U16,
    /// Entry flags
    pub entry_flag: U16,
    /// Counter
    pub counter: U32,
    /// Payload checksum
    pub crc: U32,
}

impl RawManifestEntry {
    /// Serialized size in bytes.
    pub const SIZE: usize = 24;
}

const _: () = assert!(std::mem::size_of::<RawManifestHeader>() == RawManifestHeader::SIZE);
const _: () = assert!(std::mem::size_of::<RawManifestEntry>() == RawManifestEntry::SIZE);
