#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}

/// Byte order used for every fixed-width field on the wire.
///
/// The format is big-endian ([`BigEndian`](crate::BigEndian)); the parameter
/// exists so little-endian dialects can share the same codec.
pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Containers nested deeper than this are rejected by [`ReadOptions::default`](crate::ReadOptions).
pub const DEFAULT_MAX_DEPTH: usize = 512;

// Upper bound on list capacity reserved from an untrusted element count.
pub(crate) const PREALLOCATE_LIMIT: usize = 4096;
