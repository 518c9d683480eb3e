//! CRC32C checksum utilities.
//!
//! Archive payloads interleave a CRC32C (Castagnoli) word at the end of every
//! chunk, computed over the chunk body.

/// Compute the CRC32C checksum of a byte slice.
///
/// Uses hardware acceleration when available (SSE4.2 on x86).
#[inline]
pub fn checksum(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_checksum() {
        assert_eq!(checksum(&[]), 0);
    }

    #[test]
    fn test_known_checksum() {
        // Standard CRC32C check value
        assert_eq!(checksum(b"123456789"), 0xE306_9283);
    }

    #[test]
    fn test_detects_single_bit_flip() {
        assert_ne!(checksum(b"payload"), checksum(b"paylobd"));
    }
}
