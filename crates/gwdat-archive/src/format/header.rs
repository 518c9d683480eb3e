//! Archive header structure.

use zerocopy::byteorder::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Top-level archive header, found at offset 0.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawArchiveHeader {
    /// Format version
    pub version: u8,
    /// Identifier bytes (`AN\x1A`)
    pub identifier: [u8; 3],
    /// Size of this header in bytes
    pub header_size: U32,
    /// Unknown
    pub unknown1: U32,
    /// Payload chunk size, checksum word included
    pub chunk_size: U32,
    /// Header checksum
    pub crc: U32,
    /// Unknown
    pub unknown2: U32,
    /// Offset of the manifest header
    pub manifest_offset: U64,
    /// Size of the manifest in bytes
    pub manifest_size: U32,
    /// Flags
    pub flag: U32,
}

impl RawArchiveHeader {
    /// Identifier bytes of a client archive.
    pub const IDENTIFIER: [u8; 3] = *b"AN\x1A";

    /// Serialized size in bytes.
    pub const SIZE: usize = 40;
}

const _: () = assert!(std::mem::size_of::<RawArchiveHeader>() == RawArchiveHeader::SIZE);
