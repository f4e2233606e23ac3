//! An owned tree model and recursive codec for the Named Binary Tag format.
//!
//! A [`Tag`] is a kind, an optional name and a natively typed [`Payload`].
//! [`List`] and [`Compound`] payloads own their children. Trees are decoded
//! with [`read`]/[`read_from`]/[`read_slice`] and encoded with [`write`] or
//! [`Tag::write_to_writer`]; both directions are single-pass and keep no
//! state between calls.

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

mod compound;
mod display;
mod error;
#[cfg(feature = "gzip")]
mod gzip;
mod kind;
mod list;
mod read;
#[cfg(feature = "serde")]
mod ser;
mod tag;
mod util;
mod write;

pub use compound::*;
pub use error::{Error, Result};
#[cfg(feature = "gzip")]
pub use gzip::*;
pub use kind::*;
pub use list::*;
pub use read::*;
pub use tag::{Payload, Scalar, Tag, TagId, TagMut};
pub use util::{ByteOrder, DEFAULT_MAX_DEPTH};
pub(crate) use util::{PREALLOCATE_LIMIT, cold_path};
pub use write::*;
