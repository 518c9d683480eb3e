//! Shared helpers for building synthetic `.dat` archives in memory.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::{self, Read, Seek, SeekFrom};
use std::rc::Rc;

use byteorder::{LittleEndian, WriteBytesExt};
use gwdat_archive::format::{RawArchiveHeader, RawManifestHeader, CHECKSUM_LEN};
use gwdat_common::crc;

/// Chunk size used by built archives unless overridden.
pub const CHUNK_SIZE: u32 = 16;

enum Slot {
    Stored { bytes: Vec<u8>, compression_flag: u16 },
    Dangling { offset: u64, size: u32 },
}

/// Builds an archive entry by entry, in manifest order.
pub struct DatBuilder {
    chunk_size: u32,
    header_identifier: [u8; 3],
    manifest_identifier: [u8; 4],
    slots: Vec<Slot>,
}

impl DatBuilder {
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            header_identifier: RawArchiveHeader::IDENTIFIER,
            manifest_identifier: RawManifestHeader::IDENTIFIER,
            slots: Vec::new(),
        }
    }

    pub fn chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn header_identifier(mut self, identifier: [u8; 3]) -> Self {
        self.header_identifier = identifier;
        self
    }

    /// Add an entry storing `bytes` verbatim.
    pub fn push(mut self, bytes: &[u8], compression_flag: u16) -> Self {
        self.slots.push(Slot::Stored {
            bytes: bytes.to_vec(),
            compression_flag,
        });
        self
    }

    /// Add an entry storing `body` split into checksummed chunks.
    pub fn push_framed(self, body: &[u8], compression_flag: u16) -> Self {
        let framed = frame(body, self.chunk_size);
        self.push(&framed, compression_flag)
    }

    /// Add an entry holding an id table.
    pub fn push_id_table(self, pairs: &[(u32, u32)]) -> Self {
        let mut bytes = Vec::new();
        for &(file_id, base_id) in pairs {
            bytes.write_u32::<LittleEndian>(file_id).unwrap();
            bytes.write_u32::<LittleEndian>(base_id).unwrap();
        }
        self.push(&bytes, 0)
    }

    /// Add an entry pointing wherever the caller says.
    pub fn push_dangling(mut self, offset: u64, size: u32) -> Self {
        self.slots.push(Slot::Dangling { offset, size });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = vec![0u8; RawArchiveHeader::SIZE];
        let mut entries = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            match slot {
                Slot::Stored {
                    bytes,
                    compression_flag,
                } => {
                    entries.push((out.len() as u64, bytes.len() as u32, *compression_flag));
                    out.extend_from_slice(bytes);
                }
                Slot::Dangling { offset, size } => entries.push((*offset, *size, 0)),
            }
        }

        let manifest_offset = out.len() as u64;
        out.extend_from_slice(&self.manifest_identifier);
        out.write_u64::<LittleEndian>(0).unwrap();
        out.write_u32::<LittleEndian>(entries.len() as u32 + 1).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();

        for (counter, (offset, size, compression_flag)) in entries.iter().enumerate() {
            out.write_u64::<LittleEndian>(*offset).unwrap();
            out.write_u32::<LittleEndian>(*size).unwrap();
            out.write_u16::<LittleEndian>(*compression_flag).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap(); // entry_flag
            out.write_u32::<LittleEndian>(counter as u32).unwrap();
            out.write_u32::<LittleEndian>(0).unwrap(); // crc
        }
        let manifest_size = out.len() as u64 - manifest_offset;

        let mut header = Vec::with_capacity(RawArchiveHeader::SIZE);
        header.push(0x97);
        header.extend_from_slice(&self.header_identifier);
        header.write_u32::<LittleEndian>(RawArchiveHeader::SIZE as u32).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        header.write_u32::<LittleEndian>(self.chunk_size).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        header.write_u64::<LittleEndian>(manifest_offset).unwrap();
        header.write_u32::<LittleEndian>(manifest_size as u32).unwrap();
        header.write_u32::<LittleEndian>(0).unwrap();
        out[..RawArchiveHeader::SIZE].copy_from_slice(&header);

        out
    }
}

/// Split `body` into `chunk_size` windows, each closed by a CRC32C word.
pub fn frame(body: &[u8], chunk_size: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in body.chunks(chunk_size as usize - CHECKSUM_LEN) {
        out.extend_from_slice(chunk);
        out.write_u32::<LittleEndian>(crc::checksum(chunk)).unwrap();
    }
    out
}

/// A reader that records the furthest position any seek landed on.
pub struct SeekProbe<R> {
    inner: R,
    furthest: Rc<Cell<u64>>,
}

impl<R> SeekProbe<R> {
    pub fn new(inner: R) -> (Self, Rc<Cell<u64>>) {
        let furthest = Rc::new(Cell::new(0));
        (
            Self {
                inner,
                furthest: Rc::clone(&furthest),
            },
            furthest,
        )
    }
}

impl<R: Read> Read for SeekProbe<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for SeekProbe<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let position = self.inner.seek(pos)?;
        self.furthest.set(self.furthest.get().max(position));
        Ok(position)
    }
}
