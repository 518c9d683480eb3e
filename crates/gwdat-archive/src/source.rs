//! The archive's single seekable byte source.
//!
//! All reads go through one handle with one implicit cursor. Every method takes
//! `&mut self`, so concurrent use has to be serialized by the owner.

use std::io::{Read, Seek, SeekFrom};

use gwdat_common::{FromBytes, ReadExt};
use tracing::trace;

use crate::{Error, Result};

/// Seekable archive bytes plus the name and length used in error reports.
pub struct DatSource<R> {
    inner: R,
    name: String,
    len: u64,
}

impl<R: Read + Seek> DatSource<R> {
    /// Wrap a reader, measuring its total length.
    pub fn new(mut inner: R, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let len = inner
            .seek(SeekFrom::End(0))
            .map_err(|source| Error::Load {
                archive: name.clone(),
                offset: 0,
                source,
            })?;

        Ok(Self { inner, name, len })
    }

    /// Load a fixed-size table structure at `offset`.
    ///
    /// Running past the end of the file is a format error.
    pub(crate) fn load_struct<T: FromBytes>(
        &mut self,
        section: &'static str,
        offset: u64,
    ) -> Result<T> {
        self.check_extent(section, offset, std::mem::size_of::<T>() as u64)?;
        self.seek_for_load(offset)?;
        self.inner.read_struct().map_err(load_error(&self.name, offset))
    }

    /// Load `count` consecutive table records starting at `offset`.
    ///
    /// The whole extent is bounds-checked before anything is allocated.
    pub(crate) fn load_array<T: FromBytes>(
        &mut self,
        section: &'static str,
        offset: u64,
        count: usize,
    ) -> Result<Vec<T>> {
        let expected = (count as u64)
            .checked_mul(std::mem::size_of::<T>() as u64)
            .unwrap_or(u64::MAX);
        self.check_extent(section, offset, expected)?;
        self.seek_for_load(offset)?;
        self.inner.read_structs(count).map_err(load_error(&self.name, offset))
    }

    /// Read exactly `size` payload bytes at `offset`.
    ///
    /// Failures are scoped to this request and never return a partial buffer.
    pub fn read_at(&mut self, offset: u64, size: u32) -> Result<Vec<u8>> {
        let expected = u64::from(size);
        let in_bounds = offset
            .checked_add(expected)
            .is_some_and(|end| end <= self.len);
        if !in_bounds {
            return Err(Error::OutOfBounds {
                archive: self.name.clone(),
                offset,
                expected,
                file_len: self.len,
            });
        }

        trace!(offset, size, "reading payload");
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|source| Error::Read {
                archive: self.name.clone(),
                offset,
                source,
            })?;
        let data = self.inner.read_up_to(size as usize).map_err(|err| match err {
            gwdat_common::Error::Io(source) => Error::Read {
                archive: self.name.clone(),
                offset,
                source,
            },
            other => Error::Common(other),
        })?;

        if data.len() as u64 != expected {
            return Err(Error::ShortRead {
                archive: self.name.clone(),
                offset,
                expected,
                actual: data.len() as u64,
            });
        }

        Ok(data)
    }

    fn check_extent(&self, section: &'static str, offset: u64, expected: u64) -> Result<()> {
        let available = self.len.saturating_sub(offset);
        if expected > available {
            return Err(Error::Truncated {
                archive: self.name.clone(),
                section,
                offset,
                expected,
                available,
            });
        }
        Ok(())
    }

    fn seek_for_load(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|source| Error::Load {
                archive: self.name.clone(),
                offset,
                source,
            })?;
        Ok(())
    }
}

impl<R> DatSource<R> {
    /// Archive name used in error reports.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total length of the archive in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the archive has no bytes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Map a low-level read failure during table loading to a load-time error.
pub(crate) fn load_error(
    archive: &str,
    offset: u64,
) -> impl FnOnce(gwdat_common::Error) -> Error + '_ {
    move |err| match err {
        gwdat_common::Error::Io(source) => Error::Load {
            archive: archive.to_string(),
            offset,
            source,
        },
        other => Error::Common(other),
    }
}
