use std::collections::btree_set;
use std::collections::BTreeSet;

/// Collection of unique values.
///
/// Backed by an ordered set so that anything rendered from it comes out in
/// a reproducible order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set<T: Ord> {
    values: BTreeSet<T>,
}

impl<T: Ord> Set<T> {
    pub fn new() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }

    /// Returns true when the value was not present yet
    pub fn insert(&mut self, value: T) -> bool {
        self.values.insert(value)
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.values.remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.values.iter()
    }

    /// Smallest element, handy for single-element sets
    pub fn first(&self) -> Option<&T> {
        self.values.iter().next()
    }
}

impl<T: Ord + Clone> Set<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a, T: Ord> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
