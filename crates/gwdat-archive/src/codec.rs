//! Seam for the external payload codec.
//!
//! Deframed payloads are still compressed. Decompression belongs to a codec
//! supplied by the caller; this crate ships none.

/// Error type codecs report failures with.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Turns deframed payload bytes into their decompressed form.
pub trait Codec {
    /// Decompress `data`, which was stored with `compression_flag`.
    fn decompress(&self, data: &[u8], compression_flag: u16) -> Result<Vec<u8>, CodecError>;
}

impl<F> Codec for F
where
    F: Fn(&[u8], u16) -> Result<Vec<u8>, CodecError>,
{
    fn decompress(&self, data: &[u8], compression_flag: u16) -> Result<Vec<u8>, CodecError> {
        self(data, compression_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stored;

    impl Codec for Stored {
        fn decompress(&self, data: &[u8], compression_flag: u16) -> Result<Vec<u8>, CodecError> {
            match compression_flag {
                0 => Ok(data.to_vec()),
                flag => Err(format!("unsupported compression flag {flag}").into()),
            }
        }
    }

    #[test]
    fn test_trait_object() {
        let codec: &dyn Codec = &Stored;
        assert_eq!(codec.decompress(b"abc", 0).unwrap(), b"abc");

        let err = codec.decompress(b"abc", 8).unwrap_err();
        assert_eq!(err.to_string(), "unsupported compression flag 8");
    }

    #[test]
    fn test_closure_codec() {
        let double = |data: &[u8], _: u16| -> Result<Vec<u8>, CodecError> {
            Ok(data.iter().flat_map(|&b| [b, b]).collect())
        };
        assert_eq!(double.decompress(&[1, 2], 0).unwrap(), vec![1, 1, 2, 2]);
    }
}
