//! Reader for MFT-indexed `.dat` game archives.
//!
//! A `.dat` archive is one large file holding every asset of the game client.
//! It starts with a fixed header pointing at the Master File Table (MFT), a
//! table of fixed-size entries each locating one payload. One reserved entry
//! holds a table mapping file ids to base ids.
//!
//! This crate provides:
//!
//! - Header, manifest and id table parsing at load time
//! - Random-access payload reads by manifest index
//! - Deframing, which strips the checksum word closing each payload chunk
//! - Numeric id search over the id table
//!
//! Payloads are not decompressed; implement [`Codec`] to plug a decompressor
//! in.
//!
//! # Example
//!
//! ```no_run
//! use gwdat_archive::{DatArchive, IdField};
//!
//! let mut archive = DatArchive::open("Local.dat")?;
//!
//! for (index, entry) in archive.entries().iter().enumerate().take(10) {
//!     println!("{index}: {} bytes at {:#x}", entry.size, entry.offset);
//! }
//!
//! let raw = archive.read_raw(16)?;
//! let deframed = archive.deframe(16)?;
//! assert!(deframed.len() <= raw.len());
//!
//! for base_id in archive.find(1234, IdField::BaseId) {
//!     println!("base id {base_id}");
//! }
//! # Ok::<(), gwdat_archive::Error>(())
//! ```

mod archive;
mod codec;
mod deframe;
mod error;
mod header;
mod index;
mod manifest;
mod options;
mod search;
mod source;
pub mod format;

pub use archive::DatArchive;
pub use codec::{Codec, CodecError};
pub use deframe::{deframe, deframed_len, ChecksumPolicy};
pub use error::{Error, ErrorKind, Result};
pub use header::ArchiveHeader;
pub use index::{IdIndex, IndexRecord};
pub use manifest::{Manifest, ManifestEntry, ManifestHeader};
pub use options::ArchiveOptions;
pub use search::IdField;
pub use source::DatSource;
