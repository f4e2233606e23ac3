//! Adding, removing and finding children of List and Compound tags.
//!
//! Every operation here fails with [`Error::UnsupportedOperation`] on a tag
//! whose kind does not own children. Absent children are reported as `None`.
//!
//! [`Error::UnsupportedOperation`]: crate::Error::UnsupportedOperation

use crate::{Payload, Result, Tag, TagId, TagMut, error::unsupported};

impl Tag {
    /// Appends to a List or inserts into a Compound by the child's name.
    ///
    /// A List rejects children of another kind with
    /// [`TypeMismatch`](crate::Error::TypeMismatch) and stays unchanged. A
    /// Compound overwrites an entry of the same name and rejects unnamed
    /// children with [`UnnamedEntry`](crate::Error::UnnamedEntry).
    pub fn add_tag(&mut self, child: Tag) -> Result<()> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::List(list) => list.push(child),
            Payload::Compound(compound) => compound.insert(child).map(drop),
            _ => Err(unsupported("add a child", kind)),
        }
    }

    /// The List element at `index`.
    pub fn element_mut(&mut self, index: usize) -> Result<Option<TagMut<'_>>> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::List(list) => Ok(list.get_mut(index)),
            _ => Err(unsupported("index a child", kind)),
        }
    }

    /// Removes the List element at `index`.
    pub fn remove_tag_at(&mut self, index: usize) -> Result<Tag> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::List(list) => list.remove(index),
            _ => Err(unsupported("remove a child by index", kind)),
        }
    }

    /// Removes the Compound entry named `name`, if present.
    pub fn remove_tag(&mut self, name: &str) -> Result<Option<Tag>> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::Compound(compound) => Ok(compound.remove(name)),
            _ => Err(unsupported("remove a child by name", kind)),
        }
    }

    /// Removes the node identified by `target` from this subtree.
    ///
    /// A List only looks at its own elements. A Compound first recurses into
    /// every nested Compound, then checks its own entries; Lists inside a
    /// Compound are not searched. Returns the removed tag, or `None` when
    /// `target` was not found.
    ///
    /// # Example
    ///
    /// ```
    /// use nbtag::Tag;
    ///
    /// let inner = Tag::named("hp", 20i16);
    /// let target = inner.id();
    /// let mut root = Tag::compound("", [
    ///     Tag::compound("stats", [inner]).unwrap(),
    ///     Tag::named("hp", 20i16),
    /// ])
    /// .unwrap();
    ///
    /// // The outer "hp" is equal but not identical, so it stays.
    /// assert!(root.remove_subtag(target).unwrap().is_some());
    /// assert!(root.find_by_name("hp").unwrap().is_some());
    /// assert!(root.remove_subtag(target).unwrap().is_none());
    /// ```
    pub fn remove_subtag(&mut self, target: TagId) -> Result<Option<Tag>> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::List(list) => Ok(list.remove_identical(target)),
            Payload::Compound(compound) => Ok(compound.remove_subtag(target)),
            _ => Err(unsupported("remove a subtag", kind)),
        }
    }

    /// Finds a descendant by name.
    ///
    /// A List returns its first element carrying `name` without looking
    /// inside elements. A Compound returns its direct entry when present and
    /// otherwise searches nested Compounds depth-first in insertion order,
    /// skipping Lists.
    pub fn find_by_name(&self, name: &str) -> Result<Option<&Tag>> {
        match &self.payload {
            Payload::List(list) => Ok(list.find(name)),
            Payload::Compound(compound) => Ok(compound.find(name)),
            _ => Err(unsupported("search children", self.kind())),
        }
    }

    /// Same search order as [`Tag::find_by_name`]. The match is returned as
    /// a [`TagMut`], which edits it in place but cannot replace it.
    pub fn find_by_name_mut(&mut self, name: &str) -> Result<Option<TagMut<'_>>> {
        let kind = self.kind();
        match &mut self.payload {
            Payload::List(list) => Ok(list.find_mut(name)),
            Payload::Compound(compound) => Ok(compound.find_mut(name)),
            _ => Err(unsupported("search children", kind)),
        }
    }
}
