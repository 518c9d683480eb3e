//! Error types for the archive crate.

use thiserror::Error;

/// Errors that can occur when working with `.dat` archives.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] gwdat_common::Error),

    /// I/O failure while loading the archive tables.
    #[error("failed to load {archive} at offset {offset}: {source}")]
    Load {
        archive: String,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// The archive path does not carry the expected extension.
    #[error("invalid file extension for {path}: expected '.dat'")]
    InvalidExtension { path: String },

    /// A structure carries identifier bytes other than the expected ones.
    #[error("invalid {section} identifier in {archive}: expected {expected:?}, got {actual:?}")]
    InvalidIdentifier {
        archive: String,
        section: &'static str,
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// A table extends past the end of the file.
    #[error(
        "truncated {section} in {archive} at offset {offset}: \
         expected {expected} bytes, {available} available"
    )]
    Truncated {
        archive: String,
        section: &'static str,
        offset: u64,
        expected: u64,
        available: u64,
    },

    /// The manifest declares no slots at all.
    #[error("invalid manifest in {archive}: raw entry count is 0")]
    EmptyManifest { archive: String },

    /// A payload extends past the end of the file.
    #[error(
        "payload in {archive} at offset {offset} exceeds file length: \
         expected {expected} bytes, file is {file_len} bytes"
    )]
    OutOfBounds {
        archive: String,
        offset: u64,
        expected: u64,
        file_len: u64,
    },

    /// Seeking to or reading a payload failed.
    #[error("failed to read payload in {archive} at offset {offset}: {source}")]
    Read {
        archive: String,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// Fewer payload bytes were read than requested.
    #[error("short read in {archive} at offset {offset}: expected {expected} bytes, got {actual}")]
    ShortRead {
        archive: String,
        offset: u64,
        expected: u64,
        actual: u64,
    },

    /// Entry index out of range.
    #[error("entry {index} not found: archive has {count} entries")]
    EntryNotFound { index: usize, count: usize },

    /// The header's chunk size cannot hold a checksum word.
    #[error("invalid chunk size {0}: must exceed the 4-byte checksum")]
    InvalidChunkSize(u32),

    /// A payload chunk is too short to carry its checksum word.
    #[error("chunk {chunk} is {len} bytes, too short for a 4-byte checksum")]
    TruncatedChunk { chunk: usize, len: usize },

    /// A chunk checksum does not match its body.
    #[error("checksum mismatch in chunk {chunk}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        chunk: usize,
        expected: u32,
        actual: u32,
    },

    /// The external codec rejected a payload.
    #[error("codec failed on entry {index} (compression flag {compression_flag}): {source}")]
    Codec {
        index: usize,
        compression_flag: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed archive structure or failed identity check. Fatal for a load.
    Format,
    /// Failed read of a specific payload. Loaded tables stay valid; retry is safe.
    Io,
    /// Payload bytes of one entry do not deframe. Other entries stay readable.
    Payload,
    /// Entry index out of range.
    NotFound,
    /// Failure reported by the external codec.
    Codec,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::Read { .. }
            | Self::OutOfBounds { .. }
            | Self::ShortRead { .. } => ErrorKind::Io,
            Self::TruncatedChunk { .. } | Self::ChecksumMismatch { .. } => ErrorKind::Payload,
            Self::EntryNotFound { .. } => ErrorKind::NotFound,
            Self::Codec { .. } => ErrorKind::Codec,
            Self::Common(_)
            | Self::Load { .. }
            | Self::InvalidExtension { .. }
            | Self::InvalidIdentifier { .. }
            | Self::Truncated { .. }
            | Self::EmptyManifest { .. }
            | Self::InvalidChunkSize(_) => ErrorKind::Format,
        }
    }

    /// Whether this error invalidates the archive as a whole.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let io = Error::ShortRead {
            archive: "Local.dat".into(),
            offset: 64,
            expected: 10,
            actual: 4,
        };
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(!io.is_format_error());

        let missing = Error::EntryNotFound { index: 9, count: 3 };
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let payload = Error::ChecksumMismatch {
            chunk: 2,
            expected: 1,
            actual: 0,
        };
        assert_eq!(payload.kind(), ErrorKind::Payload);
        assert!(!payload.is_format_error());
        assert_eq!(
            Error::TruncatedChunk { chunk: 0, len: 2 }.kind(),
            ErrorKind::Payload
        );
        assert!(Error::InvalidChunkSize(4).is_format_error());

        let format = Error::InvalidExtension {
            path: "Local.bin".into(),
        };
        assert!(format.is_format_error());
    }

    #[test]
    fn test_messages_carry_location() {
        let err = Error::Truncated {
            archive: "Gw2.dat".into(),
            section: "manifest entries",
            offset: 1024,
            expected: 480,
            available: 100,
        };
        let message = err.to_string();

        assert!(message.contains("Gw2.dat"));
        assert!(message.contains("1024"));
        assert!(message.contains("480"));
        assert!(message.contains("100"));
    }
}
