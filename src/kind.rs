use std::fmt;

use crate::{Error, Result};

/// The closed set of tag kinds, with their wire discriminators.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Kind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
}

impl Kind {
    /// Maps a wire discriminator to its kind, or `None` outside `0..=10`.
    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            _ => return None,
        })
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the fixed-width numeric kinds.
    ///
    /// # Example
    ///
    /// ```
    /// use nbtag::Kind;
    ///
    /// assert!(Kind::Int.is_primitive());
    /// assert!(Kind::Double.is_primitive());
    /// assert!(!Kind::String.is_primitive());
    /// assert!(!Kind::List.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns `true` for List and Compound, the kinds that own children.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Payload width in bytes for the primitive kinds.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::End => Some(0),
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            Self::ByteArray | Self::String | Self::List | Self::Compound => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
        }
    }
}

impl TryFrom<u8> for Kind {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        Kind::from_id(id).ok_or(Error::UnknownKind(id))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
