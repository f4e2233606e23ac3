use indexmap::IndexMap;

use crate::{Error, Result, Tag, TagId, TagMut, cold_path};

/// An insertion-ordered collection of tags keyed by their names.
///
/// Every entry's key is the entry's own name. Inserting a tag whose name is
/// already present overwrites that entry in place; a new name is appended.
#[derive(Clone, Default, Debug)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts each tag in order. Later duplicates overwrite earlier ones.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut compound = Self::new();
        for tag in tags {
            compound.insert(tag)?;
        }
        Ok(compound)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<TagMut<'_>> {
        self.entries.get_mut(name).map(TagMut::new)
    }

    /// Inserts `tag` under its own name and returns the entry it replaced.
    pub fn insert(&mut self, tag: Tag) -> Result<Option<Tag>> {
        let Some(name) = tag.name() else {
            cold_path();
            return Err(Error::UnnamedEntry);
        };
        Ok(self.entries.insert(name.to_owned(), tag))
    }

    /// Removes the entry named `name`, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.entries.shift_remove(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Tag> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = TagMut<'_>> {
        self.entries.values_mut().map(TagMut::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    /// Direct entry first, then a depth-first search through nested
    /// Compounds. Lists are never searched.
    pub fn find(&self, name: &str) -> Option<&Tag> {
        if let Some(tag) = self.entries.get(name) {
            return Some(tag);
        }
        self.entries
            .values()
            .filter_map(Tag::as_compound)
            .find_map(|nested| nested.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<TagMut<'_>> {
        self.find_slot(name).map(TagMut::new)
    }

    fn find_slot(&mut self, name: &str) -> Option<&mut Tag> {
        if self.entries.contains_key(name) {
            return self.entries.get_mut(name);
        }
        self.entries
            .values_mut()
            .filter_map(Tag::as_compound_mut)
            .find_map(|nested| nested.find_slot(name))
    }

    /// Removes `target` from nested Compounds first, then from this
    /// Compound's own entries. Lists are never searched.
    pub fn remove_subtag(&mut self, target: TagId) -> Option<Tag> {
        for nested in self.entries.values_mut().filter_map(Tag::as_compound_mut) {
            if let Some(removed) = nested.remove_subtag(target) {
                return Some(removed);
            }
        }
        // keys equal names, so an id match is the entry at target's name
        let position = self.entries.values().position(|tag| tag.id() == target)?;
        self.entries
            .shift_remove_index(position)
            .map(|(_, removed)| removed)
    }

    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, key: &str, tag: Tag) {
        self.entries.insert(key.to_owned(), tag);
    }
}

impl PartialEq for Compound {
    /// Order-sensitive, unlike `IndexMap`'s own equality.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
