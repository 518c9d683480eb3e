//! gwdat - reader for MFT-indexed `.dat` game archives.
//!
//! This crate provides a unified interface to the gwdat library crates.
//!
//! # Crates
//!
//! - [`gwdat_common`] - Common utilities (stream reading, CRC32C)
//! - [`gwdat_archive`] - Header, manifest and id table parsing, payload access
//!
//! # Example
//!
//! ```no_run
//! use gwdat::prelude::*;
//!
//! let options = ArchiveOptions::default().with_checksums(ChecksumPolicy::Verify);
//! let mut archive = DatArchive::open_with("Gw2.dat", options)?;
//!
//! println!("Entries: {}", archive.entry_count());
//!
//! let data = archive.deframe(16)?;
//! println!("Entry 16: {} bytes deframed", data.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use gwdat_archive as archive;
pub use gwdat_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use gwdat_archive::{
        ArchiveHeader, ArchiveOptions, ChecksumPolicy, Codec, DatArchive, ErrorKind, IdField,
        IdIndex, IndexRecord, ManifestEntry, ManifestHeader,
    };
    pub use gwdat_common::crc;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
