//! Archive header reader.

use std::io::{Read, Seek};

use gwdat_common::{FromBytes, ReadExt};
use tracing::{debug, warn};

use crate::format::RawArchiveHeader;
use crate::source::load_error;
use crate::{Error, Result};

/// The fixed top-level header of a `.dat` archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArchiveHeader {
    /// Format version.
    pub version: u8,
    /// Identifier bytes.
    pub identifier: [u8; 3],
    /// Header size in bytes as recorded in the file.
    pub header_size: u32,
    /// Unknown.
    pub unknown1: u32,
    /// Payload chunk size, checksum word included.
    pub chunk_size: u32,
    /// Header checksum.
    pub crc: u32,
    /// Unknown.
    pub unknown2: u32,
    /// Offset of the manifest header.
    pub manifest_offset: u64,
    /// Manifest size in bytes.
    pub manifest_size: u32,
    /// Flags.
    pub flag: u32,
}

impl ArchiveHeader {
    /// Read the header from the start of `reader`.
    ///
    /// This runs before the archive length is known and never seeks past
    /// offset 0, so a file that fails the identity check is rejected without
    /// touching the rest of it.
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        archive: &str,
        check_identity: bool,
    ) -> Result<Self> {
        reader.rewind().map_err(|source| Error::Load {
            archive: archive.to_string(),
            offset: 0,
            source,
        })?;

        let bytes = reader
            .read_up_to(RawArchiveHeader::SIZE)
            .map_err(load_error(archive, 0))?;
        let raw = RawArchiveHeader::read_from_bytes(&bytes).map_err(|_| Error::Truncated {
            archive: archive.to_string(),
            section: "archive header",
            offset: 0,
            expected: RawArchiveHeader::SIZE as u64,
            available: bytes.len() as u64,
        })?;
        let header = Self::from(raw);

        if check_identity && header.identifier != RawArchiveHeader::IDENTIFIER {
            return Err(Error::InvalidIdentifier {
                archive: archive.to_string(),
                section: "archive header",
                expected: RawArchiveHeader::IDENTIFIER.to_vec(),
                actual: header.identifier.to_vec(),
            });
        }

        if header.header_size as usize != RawArchiveHeader::SIZE {
            warn!(
                archive,
                header_size = header.header_size,
                "unexpected archive header size"
            );
        }

        debug!(
            version = header.version,
            chunk_size = header.chunk_size,
            manifest_offset = header.manifest_offset,
            manifest_size = header.manifest_size,
            "read archive header"
        );

        Ok(header)
    }

    /// Identifier bytes with non-printable characters escaped.
    pub fn identifier_display(&self) -> String {
        self.identifier.escape_ascii().to_string()
    }
}

impl From<RawArchiveHeader> for ArchiveHeader {
    fn from(raw: RawArchiveHeader) -> Self {
        Self {
            version: raw.version,
            identifier: raw.identifier,
            header_size: raw.header_size.get(),
            unknown1: raw.unknown1.get(),
            chunk_size: raw.chunk_size.get(),
            crc: raw.crc.get(),
            unknown2: raw.unknown2.get(),
            manifest_offset: raw.manifest_offset.get(),
            manifest_size: raw.manifest_size.get(),
            flag: raw.flag.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    fn header_bytes(identifier: &[u8; 3]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(0x97);
        buf.extend_from_slice(identifier);
        buf.write_u32::<LittleEndian>(40).unwrap(); // header_size
        buf.write_u32::<LittleEndian>(0x1111).unwrap(); // unknown1
        buf.write_u32::<LittleEndian>(0x10000).unwrap(); // chunk_size
        buf.write_u32::<LittleEndian>(0xDEADBEEF).unwrap(); // crc
        buf.write_u32::<LittleEndian>(0x2222).unwrap(); // unknown2
        buf.write_u64::<LittleEndian>(0x1_0000_0040).unwrap(); // manifest_offset
        buf.write_u32::<LittleEndian>(96).unwrap(); // manifest_size
        buf.write_u32::<LittleEndian>(3).unwrap(); // flag
        buf
    }

    #[test]
    fn test_fields_in_declared_order() {
        let mut cursor = Cursor::new(header_bytes(b"AN\x1A"));
        let header = ArchiveHeader::read(&mut cursor, "Local.dat", true).unwrap();

        assert_eq!(header.version, 0x97);
        assert_eq!(&header.identifier, b"AN\x1A");
        assert_eq!(header.header_size, 40);
        assert_eq!(header.unknown1, 0x1111);
        assert_eq!(header.chunk_size, 0x10000);
        assert_eq!(header.crc, 0xDEADBEEF);
        assert_eq!(header.unknown2, 0x2222);
        assert_eq!(header.manifest_offset, 0x1_0000_0040);
        assert_eq!(header.manifest_size, 96);
        assert_eq!(header.flag, 3);
        assert_eq!(header.identifier_display(), "AN\\x1a");
    }

    #[test]
    fn test_rereads_from_start() {
        let mut cursor = Cursor::new(header_bytes(b"AN\x1A"));
        cursor.set_position(17);

        let header = ArchiveHeader::read(&mut cursor, "Local.dat", true).unwrap();
        assert_eq!(header.chunk_size, 0x10000);
    }

    #[test]
    fn test_short_source_is_format_error() {
        let mut bytes = header_bytes(b"AN\x1A");
        bytes.truncate(30);

        let err = ArchiveHeader::read(&mut Cursor::new(bytes), "Local.dat", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(
            err,
            Error::Truncated {
                expected: 40,
                available: 30,
                ..
            }
        ));
    }

    #[test]
    fn test_identity_check() {
        let bytes = header_bytes(b"PK\x03");

        let err =
            ArchiveHeader::read(&mut Cursor::new(bytes.clone()), "Local.dat", true).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { .. }));
        assert!(err.is_format_error());

        // Relaxed loads accept foreign identifiers
        let header = ArchiveHeader::read(&mut Cursor::new(bytes), "Local.dat", false).unwrap();
        assert_eq!(&header.identifier, b"PK\x03");
    }
}
