//! Id table record structure.

use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// One file id to base id mapping, stored in the reserved manifest entry.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawIndexRecord {
    /// Id of an individual asset
    pub file_id: U32,
    /// Id of the asset group owning it
    pub base_id: U32,
}

impl RawIndexRecord {
    /// Serialized size in bytes.
    pub const SIZE: usize = 8;
}

const _: () = assert!(std::mem::size_of::<RawIndexRecord>() == RawIndexRecord::SIZE);
