use std::fmt;
use std::ops::Deref;

use crate::{Compound, Payload, Result, Tag, TagId};

/// Mutable access to a tag owned by a [`List`](crate::List) or [`Compound`].
///
/// The tag can be edited through the same checked operations as an owned
/// [`Tag`], but never replaced as a whole, so the parent's element kind and
/// the entry's key stay valid. Reads go through `Deref<Target = Tag>`.
///
/// ```compile_fail
/// use nbtag::{List, Tag};
///
/// let mut list = List::of([1i32, 2]);
/// *list.get_mut(0).unwrap() = Tag::unnamed(7i64);
/// ```
pub struct TagMut<'a> {
    tag: &'a mut Tag,
}

impl<'a> TagMut<'a> {
    #[inline]
    pub(crate) fn new(tag: &'a mut Tag) -> Self {
        Self { tag }
    }

    /// See [`Tag::set_value`].
    pub fn set_value(&mut self, value: impl Into<Payload>) -> Result<()> {
        self.tag.set_value(value)
    }

    pub fn add_tag(&mut self, child: Tag) -> Result<()> {
        self.tag.add_tag(child)
    }

    pub fn remove_tag_at(&mut self, index: usize) -> Result<Tag> {
        self.tag.remove_tag_at(index)
    }

    pub fn remove_tag(&mut self, name: &str) -> Result<Option<Tag>> {
        self.tag.remove_tag(name)
    }

    pub fn remove_subtag(&mut self, target: TagId) -> Result<Option<Tag>> {
        self.tag.remove_subtag(target)
    }

    pub fn element_mut(&mut self, index: usize) -> Result<Option<TagMut<'_>>> {
        self.tag.element_mut(index)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Result<Option<TagMut<'_>>> {
        self.tag.find_by_name_mut(name)
    }

    /// Like [`TagMut::find_by_name_mut`], keeping the parent's lifetime.
    pub fn into_found(self, name: &str) -> Result<Option<TagMut<'a>>> {
        let tag = self.tag;
        tag.find_by_name_mut(name)
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        self.tag.as_compound_mut()
    }
}

impl Deref for TagMut<'_> {
    type Target = Tag;

    #[inline]
    fn deref(&self) -> &Tag {
        &*self.tag
    }
}

impl fmt::Debug for TagMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.tag, f)
    }
}
