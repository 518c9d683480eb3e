//! Common utilities for gwdat.
//!
//! This crate provides the foundational pieces shared by the gwdat crates:
//!
//! - [`ReadExt`] - Reading fixed-layout structures and bounded byte runs from streams
//! - [`crc`] - CRC32C checksum helpers used by payload framing
//! - [`Error`] - Low-level decoding errors

mod error;
mod reader;

pub mod crc;

pub use error::{Error, Result};
pub use reader::ReadExt;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};
