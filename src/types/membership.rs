use std::collections::HashSet;

use super::course::CourseGroup;

/// The set of course-group ids a learner currently belongs to.
///
/// Fed to [`Restriction::is_restricted`](super::restriction::Restriction::is_restricted).
/// Duplicate inserts are inert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    ids: HashSet<i64>,
}

impl Membership {
    /// Create an empty membership set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group id.
    #[must_use]
    pub fn with(mut self, id: i64) -> Self {
        self.insert(id);
        self
    }

    /// Add a group id (mutable reference version).
    pub fn insert(&mut self, id: i64) {
        self.ids.insert(id);
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<i64> for Membership {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl From<&[CourseGroup]> for Membership {
    fn from(groups: &[CourseGroup]) -> Self {
        groups.iter().map(|g| g.id).collect()
    }
}

impl<'a> FromIterator<&'a CourseGroup> for Membership {
    fn from_iter<I: IntoIterator<Item = &'a CourseGroup>>(iter: I) -> Self {
        iter.into_iter().map(|g| g.id).collect()
    }
}
