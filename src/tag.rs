use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Compound, Error, Kind, List, Result, cold_path, error::unsupported};

mod handle;
mod navigate;

pub use handle::TagMut;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a single [`Tag`] node.
///
/// Every constructed or cloned tag receives a fresh id, so two structurally
/// equal subtrees remain distinguishable. Used by [`Tag::remove_subtag`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TagId(u64);

impl TagId {
    fn next() -> Self {
        TagId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The natively typed contents of a tag, one variant per [`Kind`].
#[derive(Clone, PartialEq, Debug)]
pub enum Payload {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(List),
    Compound(Compound),
}

impl Payload {
    pub const fn kind(&self) -> Kind {
        match self {
            Payload::End => Kind::End,
            Payload::Byte(_) => Kind::Byte,
            Payload::Short(_) => Kind::Short,
            Payload::Int(_) => Kind::Int,
            Payload::Long(_) => Kind::Long,
            Payload::Float(_) => Kind::Float,
            Payload::Double(_) => Kind::Double,
            Payload::ByteArray(_) => Kind::ByteArray,
            Payload::String(_) => Kind::String,
            Payload::List(_) => Kind::List,
            Payload::Compound(_) => Kind::Compound,
        }
    }
}

/// Payload types that map onto exactly one scalar [`Kind`].
///
/// # Example
///
/// ```
/// use nbtag::{Kind, Scalar, Tag};
///
/// assert_eq!(<i16 as Scalar>::KIND, Kind::Short);
///
/// let heights = Tag::list_of("heights", [64i32, 65, 63]);
/// assert_eq!(heights.element_kind(), Some(Kind::Int));
/// ```
pub trait Scalar: Into<Payload> {
    const KIND: Kind;
}

macro_rules! scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Payload {
                #[inline]
                fn from(value: $ty) -> Self {
                    Payload::$variant(value.into())
                }
            }

            impl Scalar for $ty {
                const KIND: Kind = Kind::$variant;
            }
        )*
    };
}

scalar!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => ByteArray,
    &[u8] => ByteArray,
    String => String,
    &str => String,
);

impl From<List> for Payload {
    #[inline]
    fn from(value: List) -> Self {
        Payload::List(value)
    }
}

impl From<Compound> for Payload {
    #[inline]
    fn from(value: Compound) -> Self {
        Payload::Compound(value)
    }
}

/// A node of the tree: a kind, an optional name and a payload.
///
/// The kind is fixed by the payload at construction and can never change;
/// [`Tag::set_value`] only accepts payloads of the same kind. List and
/// Compound tags own their children exclusively.
///
/// # Example
///
/// ```
/// use nbtag::{Kind, Payload, Tag};
///
/// let mut level = Tag::compound("Level", [
///     Tag::named("version", 19133i32),
///     Tag::named("LevelName", "world"),
/// ])
/// .unwrap();
/// level.add_tag(Tag::list_of("Pos", [0.5f64, 64.0, 0.5])).unwrap();
///
/// let name = level.find_by_name("LevelName").unwrap().unwrap();
/// assert_eq!(name.payload(), &Payload::String("world".into()));
/// assert_eq!(level.as_compound().unwrap().len(), 3);
/// assert_eq!(level.kind(), Kind::Compound);
/// ```
pub struct Tag {
    id: TagId,
    name: Option<String>,
    payload: Payload,
}

impl Tag {
    /// Builds a tag after checking that `payload` has the declared `kind`.
    ///
    /// End tags carry no name; passing one is rejected.
    pub fn new(kind: Kind, name: Option<&str>, payload: Payload) -> Result<Self> {
        if payload.kind() != kind {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: kind,
                actual: payload.kind(),
            });
        }
        if kind == Kind::End && name.is_some() {
            cold_path();
            return Err(unsupported("name", Kind::End));
        }
        Ok(Self::from_parts(name.map(str::to_owned), payload))
    }

    pub(crate) fn from_parts(name: Option<String>, payload: Payload) -> Self {
        Self {
            id: TagId::next(),
            name,
            payload,
        }
    }

    /// A named tag whose kind follows from `value`.
    ///
    /// End tags never carry a name, so an End payload yields [`Tag::end`]
    /// and `name` is discarded. Use [`Tag::new`] to have a named End
    /// rejected instead.
    pub fn named(name: impl Into<String>, value: impl Into<Payload>) -> Self {
        let payload: Payload = value.into();
        match payload {
            Payload::End => Self::end(),
            payload => Self::from_parts(Some(name.into()), payload),
        }
    }

    pub fn unnamed(value: impl Into<Payload>) -> Self {
        Self::from_parts(None, value.into())
    }

    /// The compound terminator: no name, no payload.
    pub fn end() -> Self {
        Self::from_parts(None, Payload::End)
    }

    /// A List tag whose element kind is taken from the first child.
    pub fn list(name: impl Into<String>, children: Vec<Tag>) -> Result<Self> {
        List::from_tags(children).map(|list| Self::named(name, list))
    }

    /// An empty List tag that will only accept `element_kind` children.
    pub fn empty_list(name: impl Into<String>, element_kind: Kind) -> Self {
        Self::named(name, List::new(element_kind))
    }

    /// A List tag of unnamed scalars.
    pub fn list_of<T: Scalar>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::named(name, List::of(values))
    }

    pub fn compound(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Tag>,
    ) -> Result<Self> {
        Compound::from_tags(children).map(|compound| Self::named(name, compound))
    }

    #[inline]
    pub fn id(&self) -> TagId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// The element kind of a List tag, `None` for every other kind.
    pub fn element_kind(&self) -> Option<Kind> {
        self.as_list().map(List::element_kind)
    }

    /// Lists are edited in place through [`Tag::add_tag`] and
    /// [`Tag::element_mut`], since their element kind is fixed.
    pub fn as_list(&self) -> Option<&List> {
        match &self.payload {
            Payload::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match &self.payload {
            Payload::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match &mut self.payload {
            Payload::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Replaces the payload, keeping the kind.
    ///
    /// A List payload must also keep the element kind.
    pub fn set_value(&mut self, value: impl Into<Payload>) -> Result<()> {
        let value = value.into();
        let kind = self.kind();
        if value.kind() != kind {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: kind,
                actual: value.kind(),
            });
        }
        if let (Payload::List(current), Payload::List(new)) = (&self.payload, &value) {
            if current.element_kind() != new.element_kind() {
                cold_path();
                return Err(Error::TypeMismatch {
                    expected: current.element_kind(),
                    actual: new.element_kind(),
                });
            }
        }
        self.payload = value;
        Ok(())
    }
}

impl Clone for Tag {
    /// Deep copy; the copy and all of its descendants get fresh identities.
    fn clone(&self) -> Self {
        Self::from_parts(self.name.clone(), self.payload.clone())
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.payload == other.payload
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("name", &self.name)
            .field("payload", &self.payload)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_gets_fresh_identity() {
        let tag = Tag::named("x", 1i32);
        let copy = tag.clone();
        assert_eq!(tag, copy);
        assert_ne!(tag.id(), copy.id());
    }

    #[test]
    fn named_end_drops_name() {
        let end = Tag::named("ignored", Payload::End);
        assert_eq!(end.kind(), Kind::End);
        assert_eq!(end.name(), None);
    }
}
