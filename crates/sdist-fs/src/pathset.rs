//! Ordered sets of relative paths

use std::collections::BTreeSet;
use std::collections::btree_set;

use crate::RelPath;

/// A set of unique relative paths.
///
/// Iteration is always in lexicographic order, so anything rendered from a
/// `PathSet` is deterministic. Set operations never mutate their inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: BTreeSet<RelPath>,
}

impl PathSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw strings, normalizing each one.
    pub fn from_strs<I, S>(paths: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().map(RelPath::new).collect()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check membership by normalized string.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Insert a path, returning whether it was newly added.
    pub fn insert(&mut self, path: RelPath) -> bool {
        self.paths.insert(path)
    }

    /// Remove a path by normalized string, returning whether it was present.
    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, RelPath> {
        self.paths.iter()
    }

    /// Paths present in either set.
    pub fn union(&self, other: &PathSet) -> PathSet {
        self.paths.union(&other.paths).cloned().collect()
    }

    /// Paths present in `self` but not in `other`.
    pub fn difference(&self, other: &PathSet) -> PathSet {
        self.paths.difference(&other.paths).cloned().collect()
    }

    /// Paths present in both sets.
    pub fn intersection(&self, other: &PathSet) -> PathSet {
        self.paths.intersection(&other.paths).cloned().collect()
    }

    /// Keep the paths for which `keep` returns true.
    pub fn filtered(&self, mut keep: impl FnMut(&RelPath) -> bool) -> PathSet {
        self.paths.iter().filter(|p| keep(p)).cloned().collect()
    }

    /// Check whether every path in `self` is also in `other`.
    pub fn is_subset(&self, other: &PathSet) -> bool {
        self.paths.is_subset(&other.paths)
    }
}

impl FromIterator<RelPath> for PathSet {
    fn from_iter<I: IntoIterator<Item = RelPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<RelPath> for PathSet {
    fn extend<I: IntoIterator<Item = RelPath>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl IntoIterator for PathSet {
    type Item = RelPath;
    type IntoIter = btree_set::IntoIter<RelPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a RelPath;
    type IntoIter = btree_set::Iter<'a, RelPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
