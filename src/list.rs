use std::slice;

use crate::{Error, Kind, Result, Scalar, Tag, TagId, TagMut, cold_path};

/// An ordered, homogeneous sequence of tags.
///
/// The element kind is fixed when the list is created, even when the list is
/// empty, and every element must have that kind. Elements are written to the
/// wire without names, so they are usually unnamed.
#[derive(Clone, PartialEq, Debug)]
pub struct List {
    kind: Kind,
    elements: Vec<Tag>,
}

impl List {
    /// An empty list accepting only `kind` elements.
    pub const fn new(kind: Kind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    /// Takes the element kind from the first tag and checks the rest
    /// against it. An empty vector yields an End-kind list.
    pub fn from_tags(tags: Vec<Tag>) -> Result<Self> {
        let kind = tags.first().map_or(Kind::End, Tag::kind);
        if kind == Kind::End && !tags.is_empty() {
            cold_path();
            return Err(Error::EndElements(tags.len()));
        }
        if let Some(stray) = tags.iter().find(|tag| tag.kind() != kind) {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: kind,
                actual: stray.kind(),
            });
        }
        Ok(Self {
            kind,
            elements: tags,
        })
    }

    /// A list of unnamed scalars. The element kind comes from `T`, so an
    /// empty iterator still produces a correctly typed list.
    ///
    /// # Example
    ///
    /// ```
    /// use nbtag::{Kind, List};
    ///
    /// let motion = List::of([0.0f64, -0.08, 0.0]);
    /// assert_eq!(motion.element_kind(), Kind::Double);
    /// assert_eq!(motion.len(), 3);
    ///
    /// let empty = List::of(Vec::<String>::new());
    /// assert_eq!(empty.element_kind(), Kind::String);
    /// ```
    pub fn of<T: Scalar>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            kind: T::KIND,
            elements: values.into_iter().map(Tag::unnamed).collect(),
        }
    }

    pub(crate) fn from_parts(kind: Kind, elements: Vec<Tag>) -> Self {
        Self { kind, elements }
    }

    #[inline]
    pub fn element_kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<TagMut<'_>> {
        self.elements.get_mut(index).map(TagMut::new)
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = TagMut<'_>> {
        self.elements.iter_mut().map(TagMut::new)
    }

    /// Appends `tag`. On a kind mismatch the list is left unchanged.
    pub fn push(&mut self, tag: Tag) -> Result<()> {
        if tag.kind() != self.kind {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: self.kind,
                actual: tag.kind(),
            });
        }
        if self.kind == Kind::End {
            cold_path();
            return Err(Error::EndElements(self.elements.len() + 1));
        }
        self.elements.push(tag);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        if index >= self.elements.len() {
            cold_path();
            return Err(Error::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        Ok(self.elements.remove(index))
    }

    /// First element whose own name is `name`. Elements are not searched.
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.elements.iter().find(|tag| tag.name() == Some(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<TagMut<'_>> {
        self.elements
            .iter_mut()
            .find(|tag| tag.name() == Some(name))
            .map(TagMut::new)
    }

    /// Removes the element that is `target` itself, not merely equal to it.
    pub fn remove_identical(&mut self, target: TagId) -> Option<Tag> {
        let position = self.elements.iter().position(|tag| tag.id() == target)?;
        Some(self.elements.remove(position))
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
