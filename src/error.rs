//! Error types for tree construction, navigation, decoding and encoding.
//!
//! This module contains the [`Error`] type which represents every failure the
//! crate can report. "Not found" outcomes are never errors: lookups and
//! removals by name or identity return `Option`.
//!
//! # Example
//!
//! ```
//! use nbtag::{BigEndian, Error, Result, read_slice};
//!
//! fn try_parse(data: &[u8]) -> Result<()> {
//!     match read_slice::<BigEndian>(data) {
//!         Ok(tag) => {
//!             println!("Parsed a {} tag", tag.kind());
//!             Ok(())
//!         }
//!         Err(Error::TruncatedStream) => {
//!             println!("Data was truncated");
//!             Err(Error::TruncatedStream)
//!         }
//!         Err(Error::UnknownKind(id)) => {
//!             println!("Unknown tag kind: {:#04x}", id);
//!             Err(Error::UnknownKind(id))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::fmt::{self, Display};
use std::io;

use crate::Kind;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when building,
/// mutating, reading or writing a tag tree.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// End-of-input while reading is reported as
    /// [`TruncatedStream`](Error::TruncatedStream) instead.
    IO(io::Error),

    /// The input ended before the current tag was complete, or a length
    /// prefix promised more bytes than remain.
    TruncatedStream,

    /// Extra bytes remain after the root tag of a slice was decoded.
    TrailingData(usize),

    /// A kind discriminator outside `0..=10` was encountered.
    UnknownKind(u8),

    /// A payload does not fit the declared kind, or a List element does not
    /// fit the List's element kind.
    TypeMismatch { expected: Kind, actual: Kind },

    /// The operation is not defined for a tag of this kind.
    UnsupportedOperation {
        operation: &'static str,
        kind: Kind,
    },

    /// A List position past the last element.
    IndexOutOfRange { index: usize, len: usize },

    /// Compound entries are keyed by name, so unnamed tags cannot be inserted.
    UnnamedEntry,

    /// A Compound entry whose own name differs from its key.
    MisnamedEntry(String),

    /// A ByteArray length prefix was negative.
    NegativeLength(i32),

    /// A name or String payload whose encoded form exceeds `u16::MAX` bytes.
    StringTooLong(usize),

    /// A ByteArray longer than `i32::MAX` bytes.
    ByteArrayTooLong(usize),

    /// A List with more than `i32::MAX` elements.
    ListTooLong(usize),

    /// A List of End-kind elements must be empty.
    EndElements(usize),

    /// Containers were nested deeper than the configured limit.
    DepthLimitExceeded(usize),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream
        } else {
            Error::IO(error)
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::TruncatedStream => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => formatter.write_str(&format!(
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            )),
            Error::UnknownKind(id) => formatter.write_str(&format!("unknown tag kind: {id:#04x}")),
            Error::TypeMismatch { expected, actual } => formatter.write_str(&format!(
                "type mismatch: expected {expected}, got {actual}"
            )),
            Error::UnsupportedOperation { operation, kind } => formatter.write_str(&format!(
                "cannot {operation} on a tag of kind {kind}"
            )),
            Error::IndexOutOfRange { index, len } => formatter.write_str(&format!(
                "index {index} out of range for list of length {len}"
            )),
            Error::UnnamedEntry => formatter.write_str("compound entries must be named"),
            Error::MisnamedEntry(key) => {
                formatter.write_str(&format!("compound entry under key {key:?} has another name"))
            }
            Error::NegativeLength(len) => {
                formatter.write_str(&format!("negative byte array length: {len}"))
            }
            Error::StringTooLong(len) => formatter.write_str(&format!(
                "string of length {len} exceeds maximum of u16::MAX"
            )),
            Error::ByteArrayTooLong(len) => formatter.write_str(&format!(
                "byte array of length {len} exceeds maximum of i32::MAX"
            )),
            Error::ListTooLong(len) => formatter.write_str(&format!("list length too long: {len}")),
            Error::EndElements(len) => {
                formatter.write_str(&format!("list of End tags must be empty, got {len} elements"))
            }
            Error::DepthLimitExceeded(max) => {
                formatter.write_str(&format!("nesting depth exceeds limit of {max}"))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}

pub(crate) fn unsupported(operation: &'static str, kind: Kind) -> Error {
    Error::UnsupportedOperation { operation, kind }
}
