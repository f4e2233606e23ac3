//! Gzip framing around the raw codec.
//!
//! Most files on disk are gzip-compressed; network payloads usually are not.
//! The tag codec itself is identical for both.

use std::io::{self, Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::{ByteOrder, Error, Result, Tag, cold_path, read_from, read_slice};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decompresses `reader` and reads one tag from it.
///
/// Like [`read`](crate::read), decompressed bytes after the tag are left
/// unread.
pub fn read_gzip<O: ByteOrder>(reader: impl Read) -> Result<Tag> {
    read_from::<O>(GzDecoder::new(reader))
}

/// Writes `tag` through a gzip encoder and finishes the gzip stream.
///
/// `writer` itself is not flushed or closed.
pub fn write_gzip<O: ByteOrder>(tag: &Tag, writer: impl Write) -> Result<()> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    tag.write_to_writer::<O>(&mut encoder)?;
    encoder.finish().map_err(Error::IO)?;
    Ok(())
}

/// Reads `data` as gzip when it starts with the gzip magic, raw otherwise.
///
/// Either way the (decompressed) input must contain exactly one tag, and
/// anything after it fails with [`Error::TrailingData`].
pub fn read_auto<O: ByteOrder>(data: &[u8]) -> Result<Tag> {
    if !data.starts_with(&GZIP_MAGIC) {
        return read_slice::<O>(data);
    }
    let mut decoder = GzDecoder::new(data);
    let tag = read_from::<O>(&mut decoder)?;
    let remaining = io::copy(&mut decoder, &mut io::sink())?;
    if remaining > 0 {
        cold_path();
        return Err(Error::TrailingData(remaining as usize));
    }
    Ok(tag)
}
