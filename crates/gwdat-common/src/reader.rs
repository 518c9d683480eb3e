//! Stream reading helpers for fixed-layout archive structures.
//!
//! Archive tables are read straight from a seekable file handle rather than a
//! mapped buffer, so these helpers sit on top of [`std::io::Read`] and report
//! how many bytes were actually available when a read comes up short.

use std::io::Read;

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Extension trait for reading binary structures from streams.
///
/// # Example
///
/// ```
/// use gwdat_common::ReadExt;
/// use std::io::Cursor;
///
/// let mut cursor = Cursor::new([0x01u8, 0x02, 0x03, 0x04, 0x05]);
///
/// assert_eq!(cursor.read_up_to(4).unwrap(), vec![1, 2, 3, 4]);
/// assert_eq!(cursor.read_up_to(4).unwrap(), vec![5]);
/// ```
pub trait ReadExt: Read {
    /// Read at most `len` bytes, stopping early only at end of stream.
    fn read_up_to(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len);
        Read::take(&mut *self, len as u64).read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Read exactly `len` bytes or fail with [`Error::UnexpectedEof`].
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let bytes = self.read_up_to(len)?;
        if bytes.len() != len {
            return Err(Error::UnexpectedEof {
                needed: len,
                available: bytes.len(),
            });
        }
        Ok(bytes)
    }

    /// Read a structure from the stream.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(&bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Read `count` consecutive structures from the stream.
    fn read_structs<T: FromBytes>(&mut self, count: usize) -> Result<Vec<T>> {
        let elem_size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(count * elem_size)?;

        let mut result = Vec::with_capacity(count);
        for chunk in bytes.chunks_exact(elem_size) {
            let item = T::read_from_bytes(chunk).map_err(|_| Error::UnexpectedEof {
                needed: elem_size,
                available: chunk.len(),
            })?;
            result.push(item);
        }
        Ok(result)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zerocopy::byteorder::little_endian::{U16, U32};
    use zerocopy::{Immutable, KnownLayout, Unaligned};

    #[derive(Debug, FromBytes, Immutable, KnownLayout, Unaligned)]
    #[repr(C)]
    struct Pair {
        id: U32,
        tag: U16,
    }

    #[test]
    fn test_read_struct() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0xFF, 0x00];
        let pair: Pair = Cursor::new(data).read_struct().unwrap();

        assert_eq!(pair.id.get(), 0x04030201);
        assert_eq!(pair.tag.get(), 0x00FF);
    }

    #[test]
    fn test_read_structs() {
        let data = [1u8, 0, 0, 0, 2, 0, 3, 0, 0, 0, 4, 0];
        let pairs: Vec<Pair> = Cursor::new(data).read_structs(2).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].id.get(), 3);
        assert_eq!(pairs[1].tag.get(), 4);
    }

    #[test]
    fn test_short_read_reports_available() {
        let mut cursor = Cursor::new([0x01u8, 0x02, 0x03]);

        match cursor.read_struct::<Pair>() {
            Err(Error::UnexpectedEof { needed, available }) => {
                assert_eq!(needed, 6);
                assert_eq!(available, 3);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn test_read_up_to_stops_at_end() {
        let mut cursor = Cursor::new(vec![7u8; 10]);
        cursor.set_position(8);

        assert_eq!(cursor.read_up_to(16).unwrap(), vec![7, 7]);
        assert!(cursor.read_up_to(4).unwrap().is_empty());
    }
}
