//! Checksum deframing of payload bytes.
//!
//! Payloads are stored as a run of `chunk_size` windows, each closed by a
//! 4-byte checksum word; the last window may be shorter. Deframing drops those
//! words and concatenates the window bodies. It does not decompress anything:
//! the result is still in whatever encoding `compression_flag` names.

use byteorder::{ByteOrder, LittleEndian};
use gwdat_common::crc;

use crate::format::CHECKSUM_LEN;
use crate::{Error, Result};

/// What to do with the checksum word closing each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Drop checksum words without looking at them.
    #[default]
    Skip,
    /// Compare each word against the CRC32C of its chunk body.
    Verify,
}

/// Strip the per-chunk checksum words from `raw`.
pub fn deframe(raw: &[u8], chunk_size: u32, policy: ChecksumPolicy) -> Result<Vec<u8>> {
    let expected_len = deframed_len(raw.len(), chunk_size)?;
    let mut out = Vec::with_capacity(expected_len);

    // Every window holds at least a checksum word once the length checks out
    for (chunk, window) in raw.chunks(chunk_size as usize).enumerate() {
        let (body, word) = window.split_at(window.len() - CHECKSUM_LEN);
        if policy == ChecksumPolicy::Verify {
            let expected = LittleEndian::read_u32(word);
            let actual = crc::checksum(body);
            if expected != actual {
                return Err(Error::ChecksumMismatch {
                    chunk,
                    expected,
                    actual,
                });
            }
        }
        out.extend_from_slice(body);
    }

    Ok(out)
}

/// Length of the deframed form of a `raw_len`-byte payload.
///
/// Fails when `chunk_size` cannot hold a checksum word or the final window is
/// shorter than one.
pub fn deframed_len(raw_len: usize, chunk_size: u32) -> Result<usize> {
    let window = chunk_size as usize;
    if window <= CHECKSUM_LEN {
        return Err(Error::InvalidChunkSize(chunk_size));
    }

    let chunks = raw_len.div_ceil(window);
    let tail = raw_len % window;
    if tail != 0 && tail < CHECKSUM_LEN {
        return Err(Error::TruncatedChunk {
            chunk: chunks - 1,
            len: tail,
        });
    }

    Ok(raw_len - chunks * CHECKSUM_LEN)
}
